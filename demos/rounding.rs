// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Prints the current local time rounded to a few common grids, and the
//! same moment one year later.
//!
//! ```text
//! cargo run --example rounding
//! ```

use caltime::{ceiling, floor, format_with_offset, round, Field, Period, Result};
use chrono::Local;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %:z";

fn main() -> Result<()> {
    let now = Local::now().fixed_offset();
    println!("now                {}", format_with_offset(&now, FORMAT)?);
    println!();

    let grids = [
        ("milliseconds", Field::Millisecond),
        ("seconds", Field::Second),
        ("minutes", Field::Minute),
        ("hours", Field::Hour),
        ("days", Field::Day),
    ];

    for (label, field) in grids {
        println!("{label}");
        println!("  floor            {}", format_with_offset(&floor(now, field)?, FORMAT)?);
        println!("  ceiling          {}", format_with_offset(&ceiling(now, field)?, FORMAT)?);
        println!("  round            {}", format_with_offset(&round(now, field)?, FORMAT)?);
    }

    println!();
    let next_year = caltime::add(now, &Period::year())?;
    println!("one year from now  {}", format_with_offset(&next_year, FORMAT)?);

    Ok(())
}
