// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! String formatting and parsing of timestamps.
//!
//! Thin wrappers around `chrono`'s `strftime`-style formatting.  Format
//! strings use chrono's specifiers (`%Y`, `%m`, `%d`, ...).

use crate::error::{CalendarError, Result};
use crate::instant::Timestamp;
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Utc};
use std::fmt::{Display, Write};

/// HTTP date format, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// ISO 8601 with offset, e.g. `1994-11-06T08:49:37+00:00`.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Format a timestamp on the UTC clock.
///
/// ```
/// use caltime::{format, Timestamp, RFC1123_FORMAT};
///
/// let t = Timestamp::from_seconds(784_111_777);
/// assert_eq!(format(t, RFC1123_FORMAT).unwrap(), "Sun, 06 Nov 1994 08:49:37 GMT");
/// ```
pub fn format(timestamp: Timestamp, fmt: &str) -> Result<String> {
    let utc = timestamp.to_utc().ok_or(CalendarError::OutOfRange)?;
    render(utc.format(fmt), fmt)
}

/// Format a zoned date-time on its local clock.
pub fn format_with_offset(datetime: &DateTime<FixedOffset>, fmt: &str) -> Result<String> {
    render(datetime.format(fmt), fmt)
}

// chrono reports an unknown specifier as `fmt::Error` at display time.
fn render(formatted: impl Display, fmt: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{formatted}").map_err(|_| CalendarError::InvalidFormat(fmt.to_owned()))?;
    Ok(out)
}

/// Human readable duration, `"{days}d HH:MM:SS.mmm"`.
///
/// Negative durations get a leading `-`.
///
/// ```
/// use caltime::format_timespan;
/// use chrono::Duration;
///
/// let span = Duration::days(2) + Duration::hours(3) + Duration::milliseconds(45_250);
/// assert_eq!(format_timespan(span), "2d 03:00:45.250");
/// ```
pub fn format_timespan(span: Duration) -> String {
    let sign = if span < Duration::zero() { "-" } else { "" };
    let span = span.abs();
    format!(
        "{sign}{}d {:02}:{:02}:{:02}.{:03}",
        span.num_days(),
        span.num_hours() % 24,
        span.num_minutes() % 60,
        span.num_seconds() % 60,
        span.num_milliseconds() % 1_000,
    )
}

/// Parse a string without offset information as a UTC timestamp.
///
/// The format must describe both a date and a time.
pub fn parse(s: &str, fmt: &str) -> Result<Timestamp> {
    let naive = NaiveDateTime::parse_from_str(s, fmt)?;
    Ok(Timestamp::from_utc(naive.and_utc()))
}

/// Parse a string carrying its own offset (the format must contain `%z`
/// or `%:z`).
pub fn parse_with_offset(s: &str, fmt: &str) -> Result<DateTime<FixedOffset>> {
    Ok(DateTime::parse_from_str(s, fmt)?)
}

/// The absolute instant of a zoned date-time.
#[inline]
pub fn to_utc_timestamp(datetime: &DateTime<FixedOffset>) -> Timestamp {
    Timestamp::from_date_time(datetime)
}

/// The same instant on the UTC clock.
#[inline]
pub fn to_utc_date_time(datetime: &DateTime<FixedOffset>) -> DateTime<Utc> {
    datetime.with_timezone(&Utc)
}
