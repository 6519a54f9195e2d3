// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-time arithmetic
//!
//! This crate adds calendar periods to date-times, rounds date-times to a
//! grid, and works with closed intervals of time.
//!
//! # Core types
//!
//! - [`Period`]: a per-field amount such as "3 months -2 days".
//! - [`Field`]: the calendar units a period is made of, microseconds to years.
//! - [`Timestamp`]: microseconds since the Unix epoch.
//! - [`CalendarDateTime`]: trait for date-time values the arithmetic accepts.
//! - [`Interval`]: a closed `[start, end]` range of timestamps.
//! - [`Grid`] / [`Rounding`]: rounding granularity and direction.
//!
//! # Calendar addition
//!
//! [`add`] applies the non-zero fields of a period from the largest unit to
//! the smallest:
//!
//! | Field | Rule |
//! |-------|------|
//! | microsecond … week | fixed length, exact |
//! | [`Field::Month`] | calendar month; the day is clamped to the month length |
//! | [`Field::Year`] | 365 days per year plus the leap days crossed |
//!
//! ```
//! use caltime::{add, Period};
//! use chrono::NaiveDate;
//!
//! let jan31 = NaiveDate::from_ymd_opt(2021, 1, 31).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let feb28 = NaiveDate::from_ymd_opt(2021, 2, 28).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! assert_eq!(add(jan31, &Period::month()).unwrap(), feb28);
//! ```
//!
//! The same functions accept [`Timestamp`], [`chrono::NaiveDateTime`] and any
//! [`chrono::DateTime`]; zoned values keep their offset.
//!
//! # Rounding
//!
//! [`floor`], [`ceiling`] and [`round`] snap a value to a grid given as a
//! [`chrono::Duration`] or a [`Field`], on the value's local clock.
//!
//! # Pre-epoch values
//!
//! Timestamps before 1970-01-01T00:00:00Z are outside the supported domain.
//! Rounding and interval results for them are undefined.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Field`], [`Period`],
//!   [`Timestamp`] and [`Interval`].

mod add;
mod calendar;
mod error;
mod format;
mod instances;
pub(crate) mod instant;
mod interval;
mod period;
mod round;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use add::{
    add, add_days, add_hours, add_microseconds, add_milliseconds, add_minutes, add_months,
    add_seconds, add_weeks, add_years, sub,
};
pub use calendar::{
    count_leap_days_before_year, count_leap_days_between_years, days_in_month, is_leap_year,
};
pub use error::{CalendarError, Result};
pub use format::{
    format, format_timespan, format_with_offset, parse, parse_with_offset, to_utc_date_time,
    to_utc_timestamp, ISO8601_FORMAT, RFC1123_FORMAT,
};
pub use instances::{instances_count, instances_in, instances_until, instances_within};
pub use instant::{CalendarDateTime, Timestamp};
pub use interval::Interval;
pub use period::{Field, Period};
pub use round::{ceiling, floor, round, Grid, Rounding};
