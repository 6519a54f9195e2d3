// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Rounding, flooring and ceiling of date-time values to a regular grid.
//!
//! A [`Grid`] is either an explicit [`Duration`] or a calendar [`Field`].
//! Rounding works on integer epoch microseconds `t` with a grid width `g`:
//!
//! | Operation | Formula |
//! |-----------|---------|
//! | [`floor`] | `(t / g) * g` |
//! | [`ceiling`] | `((t + g - 1) / g) * g` |
//! | [`round`] | `((t + g / 2 + 1) / g) * g` |
//!
//! Division truncates toward zero, so results for instants before the Unix
//! epoch are undefined.  [`round`] breaks ties toward the later instant and
//! carries an extra microsecond of bias: for grids of one or two
//! microseconds it moves values that already sit on the grid one step later.
//!
//! Zoned values are rounded on their **local wall clock** and the offset is
//! reapplied afterwards, so rounding to the hour lands on local hour
//! boundaries even under a half-hour offset.
//!
//! # Field grids
//!
//! Months and years have no fixed length.  Field grids use the mean lengths
//! of the Julian calendar instead:
//!
//! | Field | Grid |
//! |-------|------|
//! | `Week` | 7 days |
//! | `Month` | 365.25 / 12 days (≈ 30.44 days) |
//! | `Year` | 365.25 days |
//!
//! These grids are anchored at the Unix epoch and do not fall on calendar
//! month or year boundaries.  Use [`add`](crate::add) for calendar-exact
//! month and year steps.

use crate::error::{CalendarError, Result};
use crate::instant::CalendarDateTime;
use crate::period::Field;
use chrono::{DateTime, Duration};
use qtty::{Days, Second};

/// Mean Julian year, used for year grids.
const MEAN_YEAR: Days = Days::new(365.25);

/// Mean month used for month grids.
const MEAN_MONTH: Days = Days::new(365.25 / 12.0);

const MICROS_PER_SECOND: i64 = 1_000_000;

// ═══════════════════════════════════════════════════════════════════════════
// Grid
// ═══════════════════════════════════════════════════════════════════════════

/// The spacing of a rounding grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Grid {
    /// An explicit width, at microsecond resolution.
    Duration(Duration),
    /// The (approximate) length of one unit of a calendar field.
    Field(Field),
}

impl Grid {
    /// Grid width in microseconds.
    ///
    /// Fails with [`CalendarError::InvalidGranularity`] unless the width is
    /// at least one microsecond.
    pub fn micros(&self) -> Result<i64> {
        let micros = match self {
            Grid::Duration(duration) => duration
                .num_microseconds()
                .ok_or(CalendarError::OutOfRange)?,
            Grid::Field(field) => approximate_micros(*field),
        };
        if micros <= 0 {
            return Err(CalendarError::InvalidGranularity(micros));
        }
        Ok(micros)
    }
}

impl From<Duration> for Grid {
    fn from(duration: Duration) -> Self {
        Grid::Duration(duration)
    }
}

impl From<Field> for Grid {
    fn from(field: Field) -> Self {
        Grid::Field(field)
    }
}

impl Field {
    /// Length used when this field serves as a rounding grid.
    ///
    /// Exact up to weeks, a mean length for months and years.
    pub fn approximate_duration(self) -> Duration {
        Duration::microseconds(approximate_micros(self))
    }
}

fn approximate_micros(field: Field) -> i64 {
    match (field, field.fixed_micros()) {
        (_, Some(micros)) => micros,
        (Field::Month, None) => days_to_micros(MEAN_MONTH),
        (_, None) => days_to_micros(MEAN_YEAR),
    }
}

fn days_to_micros(days: Days) -> i64 {
    (days.to::<Second>().value() * MICROS_PER_SECOND as f64).round() as i64
}

// ═══════════════════════════════════════════════════════════════════════════
// Rounding rules
// ═══════════════════════════════════════════════════════════════════════════

/// Direction in which an off-grid value is moved.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rounding {
    /// Toward the earlier grid line.
    Floor,
    /// Toward the later grid line.
    Ceiling,
    /// Toward the nearest grid line, ties toward the later one.
    Nearest,
}

impl Rounding {
    /// Snap raw ticks `t` to a grid of width `g`.
    ///
    /// Returns `None` on overflow or when `g <= 0`.
    pub fn apply(self, t: i64, g: i64) -> Option<i64> {
        if g <= 0 {
            return None;
        }
        let ticks = match self {
            Rounding::Floor => t / g,
            Rounding::Ceiling => t.checked_add(g - 1)? / g,
            Rounding::Nearest => t.checked_add(g / 2 + 1)? / g,
        };
        ticks.checked_mul(g)
    }

    /// Snap `time` to `grid` in its local wall-clock frame.
    pub fn snap<T: CalendarDateTime>(self, time: T, grid: impl Into<Grid>) -> Result<T> {
        let g = grid.into().micros()?;
        let utc = time
            .to_naive_utc()
            .ok_or(CalendarError::OutOfRange)?
            .and_utc()
            .timestamp_micros();
        let offset = i64::from(time.utc_offset().local_minus_utc()) * MICROS_PER_SECOND;

        let local = utc.checked_add(offset).ok_or(CalendarError::OutOfRange)?;
        let snapped = self.apply(local, g).ok_or(CalendarError::OutOfRange)?;
        let snapped_utc = snapped
            .checked_sub(offset)
            .and_then(DateTime::from_timestamp_micros)
            .ok_or(CalendarError::OutOfRange)?;
        Ok(time.with_naive_utc(snapped_utc.naive_utc()))
    }
}

/// Round `time` down to the grid.
///
/// ```
/// use caltime::{floor, Field, Timestamp};
/// use chrono::Duration;
///
/// let t = Timestamp::from_micros(3_700_000_000);
/// assert_eq!(floor(t, Duration::hours(1)).unwrap(), Timestamp::from_micros(3_600_000_000));
/// assert_eq!(floor(t, Field::Minute).unwrap(), Timestamp::from_micros(3_660_000_000));
/// ```
pub fn floor<T: CalendarDateTime>(time: T, grid: impl Into<Grid>) -> Result<T> {
    Rounding::Floor.snap(time, grid)
}

/// Round `time` up to the grid.
pub fn ceiling<T: CalendarDateTime>(time: T, grid: impl Into<Grid>) -> Result<T> {
    Rounding::Ceiling.snap(time, grid)
}

/// Round `time` to the nearest grid line, ties toward the later one.
pub fn round<T: CalendarDateTime>(time: T, grid: impl Into<Grid>) -> Result<T> {
    Rounding::Nearest.snap(time, grid)
}
