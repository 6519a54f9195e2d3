// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Recurring instances.
//!
//! Each generator starts at a date-time and repeatedly applies a [`Period`]
//! with [`add`], collecting the visited values eagerly into a `Vec`.
//!
//! | Function | Bound |
//! |----------|-------|
//! | [`instances_count`] | exactly `count` values |
//! | [`instances_until`] | values strictly before `end` |
//! | [`instances_within`] | values strictly before `start + span` |
//! | [`instances_in`] | values strictly before the interval's end |
//!
//! The bounded forms only terminate if every step moves the running value
//! forward.  They fail with [`CalendarError::EmptyPeriod`] for an all-zero
//! period and with [`CalendarError::NonAdvancingPeriod`] as soon as a step
//! fails to move past the previous value.

use crate::add::{add, add_microseconds};
use crate::error::{CalendarError, Result};
use crate::instant::{CalendarDateTime, Timestamp};
use crate::interval::Interval;
use crate::period::Period;
use chrono::Duration;
use log::debug;

/// The first `count` values of `start`, `start + period`, `start + 2·period`, ...
///
/// Each value is obtained by adding `period` to the previous one, so month
/// and year clamps accumulate: `Jan 31 + 1 month` is `Feb 28`, and the value
/// after that is `Mar 28`.
///
/// An empty period yields `count` copies of `start`.
///
/// ```
/// use caltime::{instances_count, Period, Timestamp};
///
/// let days = instances_count(Timestamp::EPOCH, 3, &Period::days(1)).unwrap();
/// assert_eq!(days[2], Timestamp::from_seconds(2 * 86_400));
/// ```
pub fn instances_count<T>(start: T, count: usize, period: &Period) -> Result<Vec<T>>
where
    T: CalendarDateTime + Clone,
{
    let mut instances = Vec::with_capacity(count);
    if count == 0 {
        return Ok(instances);
    }

    let mut current = start;
    for _ in 1..count {
        let next = add(current.clone(), period)?;
        instances.push(current);
        current = next;
    }
    instances.push(current);

    debug!("generated {count} instances of {period}");
    Ok(instances)
}

/// All values `start`, `start + period`, ... strictly before `end`.
///
/// Returns an empty list if `start >= end`.
pub fn instances_until<T>(start: T, end: &T, period: &Period) -> Result<Vec<T>>
where
    T: CalendarDateTime + PartialOrd + Clone,
{
    if period.is_empty() {
        return Err(CalendarError::EmptyPeriod);
    }

    let mut instances = Vec::new();
    let mut current = start;
    while current < *end {
        let next = add(current.clone(), period)?;
        if next <= current {
            return Err(CalendarError::NonAdvancingPeriod(period.to_string()));
        }
        instances.push(current);
        current = next;
    }

    debug!("generated {} instances of {period}", instances.len());
    Ok(instances)
}

/// All values `start`, `start + period`, ... strictly before `start + span`.
pub fn instances_within<T>(start: T, span: Duration, period: &Period) -> Result<Vec<T>>
where
    T: CalendarDateTime + PartialOrd + Clone,
{
    let span = span.num_microseconds().ok_or(CalendarError::OutOfRange)?;
    let end = add_microseconds(start.clone(), span)?;
    instances_until(start, &end, period)
}

/// All values from the interval's start, stepping by `period`, strictly
/// before its end.
///
/// The end bound is exclusive even though [`Interval`] itself is closed.
pub fn instances_in(interval: &Interval, period: &Period) -> Result<Vec<Timestamp>> {
    instances_until(interval.start(), &interval.end(), period)
}
