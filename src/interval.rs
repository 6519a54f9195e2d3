// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Closed time intervals.
//!
//! An [`Interval`] is an ordered pair of [`Timestamp`]s with `start <= end`.
//! Every constructor and setter swaps the bounds when they arrive in the
//! wrong order, so the invariant always holds.
//!
//! # Comparison
//!
//! `==` compares both bounds.  `<`, `<=`, `>` and `>=` compare only the
//! start and exist to sort collections of intervals.  Two intervals sharing
//! a start but not an end are therefore neither `<` nor `>` each other, and
//! both `<=` and `>=` hold, while `==` does not.

use crate::instant::Timestamp;
use chrono::{DateTime, Duration, TimeZone};
use qtty::Days;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// A closed interval `[start, end]` of timestamps.
///
/// # Examples
///
/// ```
/// use caltime::{Interval, Timestamp};
///
/// let a = Timestamp::from_seconds(10);
/// let b = Timestamp::from_seconds(20);
///
/// // Bounds are normalized.
/// let interval = Interval::new(b, a);
/// assert_eq!(interval.start(), a);
/// assert_eq!(interval.end(), b);
///
/// assert_eq!(interval.lerp(0.5, true), Timestamp::from_seconds(15));
/// assert_eq!(interval.map(Timestamp::from_seconds(15), true), 0.5);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Timestamp,
    end: Timestamp,
}

impl Interval {
    // ── constructors ──────────────────────────────────────────────────

    /// Creates an interval between two timestamps, in either order.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        if start <= end {
            Interval { start, end }
        } else {
            Interval {
                start: end,
                end: start,
            }
        }
    }

    /// Creates an interval between two `chrono` date-times, in either order.
    pub fn from_date_times<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Self {
        Self::new(Timestamp::from_date_time(start), Timestamp::from_date_time(end))
    }

    /// Creates an interval of total length `timespan` centred on `center`.
    ///
    /// The half-width is `timespan / 2` in whole microseconds, so an odd
    /// timespan yields an interval one microsecond shorter than requested.
    /// A negative timespan is accepted; the bounds are swapped.  Bounds that
    /// would overflow saturate at the ends of the `i64` range.
    pub fn from_center(center: Timestamp, timespan: Duration) -> Self {
        let half = timespan.num_microseconds().unwrap_or(i64::MAX) / 2;
        let micros = center.micros();
        Self::new(
            Timestamp::from_micros(micros.saturating_sub(half)),
            Timestamp::from_micros(micros.saturating_add(half)),
        )
    }

    // ── mutators ──────────────────────────────────────────────────────

    /// Replaces both bounds, swapping them if needed.
    pub fn set(&mut self, start: Timestamp, end: Timestamp) {
        *self = Self::new(start, end);
    }

    /// Replaces both bounds by a centred interval, see [`Interval::from_center`].
    pub fn set_from_center(&mut self, center: Timestamp, timespan: Duration) {
        *self = Self::from_center(center, timespan);
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The earlier bound.
    #[inline]
    pub const fn start(&self) -> Timestamp {
        self.start
    }

    /// The later bound.
    #[inline]
    pub const fn end(&self) -> Timestamp {
        self.end
    }

    /// `end - start`.
    #[inline]
    pub fn timespan(&self) -> Duration {
        self.end - self.start
    }

    /// Length of the interval in days.
    ///
    /// ```
    /// use caltime::{Interval, Timestamp};
    /// use qtty::Days;
    ///
    /// let interval = Interval::new(Timestamp::EPOCH, Timestamp::from_seconds(129_600));
    /// assert_eq!(interval.duration_days(), Days::new(1.5));
    /// ```
    pub fn duration_days(&self) -> Days {
        Days::new(self.span_micros() / MICROS_PER_DAY)
    }

    fn span_micros(&self) -> f64 {
        self.end.micros() as f64 - self.start.micros() as f64
    }

    // ── interpolation ─────────────────────────────────────────────────

    /// The timestamp at fraction `amount` of the way from start to end.
    ///
    /// With `clamp`, `amount` is first limited to `[0, 1]`.  The offset is
    /// truncated to whole microseconds; results beyond the `i64` range
    /// saturate.
    pub fn lerp(&self, amount: f64, clamp: bool) -> Timestamp {
        let amount = if clamp { clamp_unit(amount) } else { amount };
        let offset = (self.span_micros() * amount) as i64;
        Timestamp::from_micros(self.start.micros().saturating_add(offset))
    }

    /// Fraction of the way `time` lies from start to end; the inverse of
    /// [`Interval::lerp`].
    ///
    /// With `clamp`, the result is limited to `[0, 1]`.  For a zero-length
    /// interval the division is by zero and the result is NaN or infinite
    /// (clamped to `0` or `1` when `clamp` is set and the value is infinite);
    /// callers that can meet such intervals must check
    /// [`Interval::timespan`] first.
    pub fn map(&self, time: Timestamp, clamp: bool) -> f64 {
        let offset = time.micros() as f64 - self.start.micros() as f64;
        let amount = offset / self.span_micros();
        if clamp {
            clamp_unit(amount)
        } else {
            amount
        }
    }

    /// Same as `map(time, true)`.
    #[inline]
    pub fn normalize(&self, time: Timestamp) -> f64 {
        self.map(time, true)
    }

    // ── containment ───────────────────────────────────────────────────

    /// `true` iff `start <= time <= end`.
    #[inline]
    pub fn contains(&self, time: Timestamp) -> bool {
        self.start <= time && time <= self.end
    }

    /// `true` iff both bounds of `other` lie inside `self`.
    #[inline]
    pub fn contains_interval(&self, other: &Interval) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// `true` iff the two closed intervals share at least one instant.
    ///
    /// The relation is symmetric; touching endpoints count as intersecting.
    pub fn intersects(&self, other: &Interval) -> bool {
        self.contains(other.start)
            || self.contains(other.end)
            || other.contains(self.start)
            || other.contains(self.end)
    }

    /// The overlapping sub-interval of `self` and `other`.
    ///
    /// Intervals are closed, so intervals that only touch yield a zero-length
    /// interval; disjoint intervals yield `None`.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Interval { start, end })
    }
}

fn clamp_unit(amount: f64) -> f64 {
    if amount > 1.0 {
        1.0
    } else if amount < 0.0 {
        0.0
    } else {
        amount
    }
}

/// Orders intervals by their start only.
///
/// This is not consistent with `==`: `partial_cmp` returns
/// `Some(Ordering::Equal)` for intervals that share a start but differ in
/// their end, which `==` reports as unequal.  It is meant for sorting only:
/// do not wrap it in an `Ord` to key a `BTreeSet` or `BTreeMap`, and sort
/// with a custom comparator when ties on the start matter.
impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.start.cmp(&other.start))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl From<(Timestamp, Timestamp)> for Interval {
    fn from((start, end): (Timestamp, Timestamp)) -> Self {
        Self::new(start, end)
    }
}

// Serde support
//
// Serialized as `{ "start": µs, "end": µs }`.  Deserialization goes through
// `Interval::new`, so reversed bounds in the input are normalized.
#[cfg(feature = "serde")]
impl Serialize for Interval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: Timestamp,
            end: Timestamp,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Interval::new(raw.start, raw.end))
    }
}
