// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Absolute instants and the date-time abstraction used by the arithmetic.
//!
//! [`Timestamp`] is a raw count of microseconds since the Unix epoch.  It is
//! the value type stored by [`Interval`](crate::Interval) and produced by the
//! instance generators.
//!
//! [`CalendarDateTime`] is the seam between the calendar arithmetic and the
//! concrete date-time representations.  Calendar addition and rounding are
//! written once against this trait and work unchanged for:
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`Timestamp`] | raw epoch microseconds |
//! | [`NaiveDateTime`] | timezone-naive wall clock, read as UTC |
//! | [`DateTime<Utc>`] | UTC date-time |
//! | [`DateTime<FixedOffset>`] | zoned / local date-time |
//!
//! Timestamps before the Unix epoch are not supported.  Nothing rejects
//! them, but rounding and interval results for negative values are
//! undefined.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Timestamp
// ═══════════════════════════════════════════════════════════════════════════

/// A point in time, in microseconds since 1970-01-01T00:00:00Z.
///
/// The struct is `Copy` and layout-identical to an `i64`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Timestamp {
    micros: i64,
}

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self::from_micros(0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from raw epoch microseconds.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Self { micros }
    }

    /// Create from whole epoch seconds.
    #[inline]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::from_micros(seconds * 1_000_000)
    }

    /// The current system time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Raw epoch microseconds.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.micros
    }

    // ── chrono helpers ────────────────────────────────────────────────

    /// Build from a `chrono::DateTime<Utc>`, dropping sub-microsecond digits.
    #[inline]
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self::from_micros(datetime.timestamp_micros())
    }

    /// Build from any `chrono` date-time; the absolute instant is kept.
    #[inline]
    pub fn from_date_time<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::from_micros(datetime.timestamp_micros())
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    #[inline]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.micros)
    }

    /// Add a duration, returning `None` on overflow.
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let micros = duration.num_microseconds()?;
        self.micros.checked_add(micros).map(Self::from_micros)
    }

    /// Subtract a duration, returning `None` on overflow.
    pub fn checked_sub(self, duration: Duration) -> Option<Self> {
        let micros = duration.num_microseconds()?;
        self.micros.checked_sub(micros).map(Self::from_micros)
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(datetime) => write!(f, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ")),
            None => write!(f, "{} µs since epoch", self.micros),
        }
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────
//
// Like chrono's own operators these panic when the result overflows; use
// `checked_add` / `checked_sub` to handle that case.

impl Add<Duration> for Timestamp {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs)
            .expect("`Timestamp + Duration` overflowed")
    }
}

impl AddAssign<Duration> for Timestamp {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        self.checked_sub(rhs)
            .expect("`Timestamp - Duration` overflowed")
    }
}

impl SubAssign<Duration> for Timestamp {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

/// Elapsed time between two timestamps, saturating at the `i64` range.
impl Sub for Timestamp {
    type Output = Duration;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Duration::microseconds(self.micros.saturating_sub(rhs.micros))
    }
}

// ── From conversions ──────────────────────────────────────────────────────

impl From<DateTime<Utc>> for Timestamp {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    #[inline]
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self::from_date_time(&datetime)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarDateTime trait
// ═══════════════════════════════════════════════════════════════════════════

/// A value that can be decomposed into calendar fields and rebuilt.
///
/// Implementors expose their absolute instant as a UTC wall clock plus the
/// offset they carry, and can rebuild themselves from a new UTC wall clock
/// while keeping their own zone.
pub trait CalendarDateTime: Sized {
    /// UTC wall-clock fields of the absolute instant.
    ///
    /// Returns `None` if the instant cannot be represented by chrono.
    fn to_naive_utc(&self) -> Option<NaiveDateTime>;

    /// Offset between local wall clock and UTC (zero for UTC-only types).
    fn utc_offset(&self) -> FixedOffset;

    /// Same kind of value, moved to the instant `utc`, zone reattached.
    fn with_naive_utc(&self, utc: NaiveDateTime) -> Self;
}

impl CalendarDateTime for Timestamp {
    #[inline]
    fn to_naive_utc(&self) -> Option<NaiveDateTime> {
        self.to_utc().map(|datetime| datetime.naive_utc())
    }

    #[inline]
    fn utc_offset(&self) -> FixedOffset {
        Utc.fix()
    }

    #[inline]
    fn with_naive_utc(&self, utc: NaiveDateTime) -> Self {
        Self::from_micros(utc.and_utc().timestamp_micros())
    }
}

impl CalendarDateTime for NaiveDateTime {
    #[inline]
    fn to_naive_utc(&self) -> Option<NaiveDateTime> {
        Some(*self)
    }

    #[inline]
    fn utc_offset(&self) -> FixedOffset {
        Utc.fix()
    }

    #[inline]
    fn with_naive_utc(&self, utc: NaiveDateTime) -> Self {
        utc
    }
}

impl<Tz: TimeZone> CalendarDateTime for DateTime<Tz> {
    #[inline]
    fn to_naive_utc(&self) -> Option<NaiveDateTime> {
        Some(self.naive_utc())
    }

    #[inline]
    fn utc_offset(&self) -> FixedOffset {
        self.offset().fix()
    }

    #[inline]
    fn with_naive_utc(&self, utc: NaiveDateTime) -> Self {
        self.timezone().from_utc_datetime(&utc)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn timestamp_utc_roundtrip() {
        let datetime = Utc.with_ymd_and_hms(2024, 2, 29, 13, 45, 10).unwrap()
            + Duration::microseconds(123_456);
        let ts = Timestamp::from_utc(datetime);
        assert_eq!(ts.micros(), datetime.timestamp_micros());
        assert_eq!(ts.to_utc(), Some(datetime));
    }

    #[test]
    fn timestamp_from_zoned_keeps_instant() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let zoned = offset.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap();
        let ts = Timestamp::from(zoned);
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ts, Timestamp::from(utc));
    }

    #[test]
    fn timestamp_arithmetic() {
        let mut ts = Timestamp::from_seconds(100);
        assert_eq!((ts + Duration::seconds(5)).micros(), 105_000_000);
        assert_eq!((ts - Duration::milliseconds(1)).micros(), 99_999_000);

        ts += Duration::microseconds(7);
        ts -= Duration::microseconds(2);
        assert_eq!(ts.micros(), 100_000_005);

        let diff = ts - Timestamp::from_seconds(100);
        assert_eq!(diff, Duration::microseconds(5));
    }

    #[test]
    fn timestamp_checked_overflow() {
        let max = Timestamp::from_micros(i64::MAX);
        assert_eq!(max.checked_add(Duration::microseconds(1)), None);
        assert_eq!(
            Timestamp::EPOCH.checked_sub(Duration::seconds(1)),
            Some(Timestamp::from_seconds(-1))
        );
    }

    #[test]
    fn timestamp_out_of_chrono_range() {
        let far = Timestamp::from_micros(i64::MAX);
        assert_eq!(far.to_utc(), None);
        assert_eq!(far.to_naive_utc(), None);
        assert!(far.to_string().contains("since epoch"));
    }

    #[test]
    fn timestamp_display() {
        let ts = Timestamp::from_micros(1_500_000);
        assert_eq!(ts.to_string(), "1970-01-01T00:00:01.500000Z");
    }

    #[test]
    fn ordering() {
        let a = Timestamp::from_micros(1);
        let b = Timestamp::from_micros(2);
        assert!(a < b);
        assert_eq!(a.max(b), b);
        assert_eq!(Timestamp::default(), Timestamp::EPOCH);
    }

    #[test]
    fn calendar_date_time_for_zoned_reattaches_offset() {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let zoned = offset.with_ymd_and_hms(2023, 6, 1, 22, 0, 0).unwrap();
        assert_eq!(zoned.utc_offset(), offset);

        let utc = zoned.to_naive_utc().unwrap();
        assert_eq!(
            utc,
            NaiveDate::from_ymd_opt(2023, 6, 2)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        );

        let moved = zoned.with_naive_utc(utc + Duration::hours(2));
        assert_eq!(moved.offset(), &offset);
        assert_eq!(moved.naive_local().to_string(), "2023-06-02 00:00:00");
    }

    #[test]
    fn calendar_date_time_for_naive_is_identity() {
        let naive = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(naive.to_naive_utc(), Some(naive));
        assert_eq!(naive.utc_offset().local_minus_utc(), 0);
        assert_eq!(naive.with_naive_utc(naive), naive);
    }
}
