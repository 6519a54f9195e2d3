// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-aware addition of a [`Period`] to a date-time value.
//!
//! Fields are applied from the largest unit down to the smallest: years,
//! months, weeks, days, hours, minutes, seconds, milliseconds and
//! microseconds.  Fields holding zero are skipped.
//!
//! * **Weeks and smaller** are fixed-length offsets (`amount × unit`).
//! * **Months** move the calendar month and clamp the day of month to the
//!   length of the target month, so `Jan 31 + 1 month` is the last day of
//!   February rather than an overflow into March.
//! * **Years** add `365 × amount` days plus one day for every 29th of
//!   February crossed on the way, which keeps the month and day unchanged
//!   except for `Feb 29`, which lands on `Feb 28` in common years.
//!
//! Zoned values are moved on their absolute instant and keep their offset.
//!
//! # Examples
//!
//! ```
//! use caltime::{add, Period};
//! use chrono::NaiveDate;
//!
//! let jan31 = NaiveDate::from_ymd_opt(2021, 1, 31).unwrap().and_hms_opt(8, 30, 0).unwrap();
//! let feb = add(jan31, &Period::month()).unwrap();
//! assert_eq!(feb.to_string(), "2021-02-28 08:30:00");
//! ```

use crate::calendar::{count_leap_days_between_years, days_in_month};
use crate::error::{CalendarError, Result};
use crate::instant::{CalendarDateTime, Timestamp};
use crate::period::{Field, Period};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone};
use std::ops::{Add, AddAssign, Sub, SubAssign};

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Year spans beyond this cannot land inside chrono's range from anywhere.
const MAX_YEAR_SPAN: u64 = 1_000_000;

// ═══════════════════════════════════════════════════════════════════════════
// Generic entry points
// ═══════════════════════════════════════════════════════════════════════════

/// Add `period` to `time`.
///
/// Returns [`CalendarError::OutOfRange`] if an intermediate or final value
/// leaves the representable range.
pub fn add<T: CalendarDateTime>(time: T, period: &Period) -> Result<T> {
    let utc = time.to_naive_utc().ok_or(CalendarError::OutOfRange)?;
    let moved = add_to_naive(utc, period)?;
    Ok(time.with_naive_utc(moved))
}

/// Subtract `period` from `time`; equivalent to adding the negated period.
pub fn sub<T: CalendarDateTime>(time: T, period: &Period) -> Result<T> {
    add(time, &-*period)
}

/// Adds `amount` microseconds (the Microsecond field).
pub fn add_microseconds<T: CalendarDateTime>(time: T, amount: i64) -> Result<T> {
    add(time, &Period::microseconds(amount))
}

/// Adds `amount` milliseconds (the Millisecond field).
pub fn add_milliseconds<T: CalendarDateTime>(time: T, amount: i64) -> Result<T> {
    add(time, &Period::milliseconds(amount))
}

/// Adds `amount` seconds (the Second field).
pub fn add_seconds<T: CalendarDateTime>(time: T, amount: i64) -> Result<T> {
    add(time, &Period::seconds(amount))
}

/// Adds `amount` minutes (the Minute field).
pub fn add_minutes<T: CalendarDateTime>(time: T, amount: i64) -> Result<T> {
    add(time, &Period::minutes(amount))
}

/// Adds `amount` hours (the Hour field).
pub fn add_hours<T: CalendarDateTime>(time: T, amount: i64) -> Result<T> {
    add(time, &Period::hours(amount))
}

/// Adds `amount` days (the Day field).
pub fn add_days<T: CalendarDateTime>(time: T, amount: i64) -> Result<T> {
    add(time, &Period::days(amount))
}

/// Adds `amount` weeks (the Week field).
pub fn add_weeks<T: CalendarDateTime>(time: T, amount: i64) -> Result<T> {
    add(time, &Period::weeks(amount))
}

/// Adds `amount` months (the Month field). Clamps the day of month to the target month.
pub fn add_months<T: CalendarDateTime>(time: T, amount: i64) -> Result<T> {
    add(time, &Period::months(amount))
}

/// Adds `amount` years (the Year field). Counts the 29 Februaries crossed.
pub fn add_years<T: CalendarDateTime>(time: T, amount: i64) -> Result<T> {
    add(time, &Period::years(amount))
}

// ═══════════════════════════════════════════════════════════════════════════
// Field arithmetic on the UTC wall clock
// ═══════════════════════════════════════════════════════════════════════════

fn add_to_naive(mut datetime: NaiveDateTime, period: &Period) -> Result<NaiveDateTime> {
    for (field, amount) in period.iter() {
        datetime = match (field, field.fixed_micros()) {
            (_, Some(unit)) => {
                let micros = amount
                    .checked_mul(unit)
                    .ok_or(CalendarError::OutOfRange)?;
                shift(datetime, micros)?
            }
            (Field::Month, None) => add_months_to(datetime, amount)?,
            (_, None) => add_years_to(datetime, amount)?,
        };
    }
    Ok(datetime)
}

fn shift(datetime: NaiveDateTime, micros: i64) -> Result<NaiveDateTime> {
    datetime
        .checked_add_signed(Duration::microseconds(micros))
        .ok_or(CalendarError::OutOfRange)
}

fn add_months_to(datetime: NaiveDateTime, amount: i64) -> Result<NaiveDateTime> {
    let total = i64::from(datetime.month())
        .checked_add(amount)
        .ok_or(CalendarError::OutOfRange)?;
    let mut years = total / 12;
    let mut month = total % 12;
    if month < 1 {
        month += 12;
        years -= 1;
    }

    let carried = if years != 0 {
        add_years_to(datetime, years)?
    } else {
        datetime
    };

    // 1 <= month <= 12 here.
    let month = month as u32;
    let year = carried.year();
    let day = datetime.day().min(days_in_month(i64::from(year), month));
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::OutOfRange)?;
    Ok(date.and_time(carried.time()))
}

fn add_years_to(datetime: NaiveDateTime, amount: i64) -> Result<NaiveDateTime> {
    if amount.unsigned_abs() > MAX_YEAR_SPAN {
        return Err(CalendarError::OutOfRange);
    }
    let year = i64::from(datetime.year());
    // Whether this year's 29 February (if any) is already behind us.
    let past_leap_day = (datetime.month(), datetime.day()) >= (2, 29);

    let days = if amount > 0 {
        let leap_days = if past_leap_day {
            count_leap_days_between_years(year + 1, year + amount + 1)
        } else {
            count_leap_days_between_years(year, year + amount)
        };
        365 * amount + leap_days
    } else {
        let span = -amount;
        let leap_days = if past_leap_day {
            count_leap_days_between_years(year - span + 1, year + 1)
        } else {
            count_leap_days_between_years(year - span, year)
        };
        -(365 * span + leap_days)
    };
    let micros = days
        .checked_mul(MICROS_PER_DAY)
        .ok_or(CalendarError::OutOfRange)?;
    shift(datetime, micros)
}

// ═══════════════════════════════════════════════════════════════════════════
// Operator sugar
// ═══════════════════════════════════════════════════════════════════════════
//
// `time + period` mirrors chrono's operators: it panics when the result is
// out of range.  Use [`add`] to get a `Result` instead.

macro_rules! impl_period_ops {
    ([$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> Add<Period> for $ty {
            type Output = Self;
            fn add(self, rhs: Period) -> Self::Output {
                add(self, &rhs).expect("`+ Period` out of representable range")
            }
        }

        impl<$($generics)*> AddAssign<Period> for $ty {
            fn add_assign(&mut self, rhs: Period) {
                *self = add(self.clone(), &rhs).expect("`+= Period` out of representable range");
            }
        }

        impl<$($generics)*> Sub<Period> for $ty {
            type Output = Self;
            fn sub(self, rhs: Period) -> Self::Output {
                sub(self, &rhs).expect("`- Period` out of representable range")
            }
        }

        impl<$($generics)*> SubAssign<Period> for $ty {
            fn sub_assign(&mut self, rhs: Period) {
                *self = sub(self.clone(), &rhs).expect("`-= Period` out of representable range");
            }
        }
    };
}

impl_period_ops!([] Timestamp);
impl_period_ops!([] NaiveDateTime);
impl_period_ops!([Tz: TimeZone] DateTime<Tz>);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn at_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn empty_period_is_identity() {
        let t = at_hms(2022, 7, 4, 12, 34, 56);
        assert_eq!(add(t, &Period::new()).unwrap(), t);
    }

    #[test]
    fn sub_day_fields_are_fixed_offsets() {
        let t = at(2022, 1, 1);
        assert_eq!(
            add_microseconds(t, 1).unwrap(),
            t + Duration::microseconds(1)
        );
        assert_eq!(add_milliseconds(t, -5).unwrap(), t - Duration::milliseconds(5));
        assert_eq!(add_seconds(t, 90).unwrap(), at_hms(2022, 1, 1, 0, 1, 30));
        assert_eq!(add_hours(t, 25).unwrap(), at_hms(2022, 1, 2, 1, 0, 0));
        assert_eq!(add_days(t, -1).unwrap(), at(2021, 12, 31));
        assert_eq!(add_weeks(t, 2).unwrap(), at(2022, 1, 15));
    }

    #[test]
    fn add_minutes_uses_the_minute_field() {
        let t = at(2022, 1, 1);
        assert_eq!(add_minutes(t, 3).unwrap(), at_hms(2022, 1, 1, 0, 3, 0));
    }

    #[test]
    fn month_end_clamps_to_shorter_month() {
        assert_eq!(add_months(at(2021, 1, 31), 1).unwrap(), at(2021, 2, 28));
        assert_eq!(add_months(at(2020, 1, 31), 1).unwrap(), at(2020, 2, 29));
        assert_eq!(add_months(at(2021, 3, 31), 1).unwrap(), at(2021, 4, 30));
        assert_eq!(add_months(at(2021, 3, 31), -1).unwrap(), at(2021, 2, 28));
    }

    #[test]
    fn month_carries_into_years() {
        assert_eq!(add_months(at(2021, 12, 31), 1).unwrap(), at(2022, 1, 31));
        assert_eq!(add_months(at(2021, 11, 15), 1).unwrap(), at(2021, 12, 15));
        assert_eq!(add_months(at(2021, 1, 15), -1).unwrap(), at(2020, 12, 15));
        assert_eq!(add_months(at(2021, 1, 15), -13).unwrap(), at(2019, 12, 15));
        assert_eq!(add_months(at(2021, 3, 15), -5).unwrap(), at(2020, 10, 15));
        assert_eq!(add_months(at(2021, 5, 15), 31).unwrap(), at(2023, 12, 15));
        assert_eq!(add_months(at(2020, 2, 29), 12).unwrap(), at(2021, 2, 28));
        assert_eq!(add_months(at(2020, 2, 29), 48).unwrap(), at(2024, 2, 29));
    }

    #[test]
    fn month_keeps_time_of_day() {
        let t = at_hms(2021, 1, 31, 17, 45, 9);
        let moved = add_months(t, 1).unwrap();
        assert_eq!((moved.hour(), moved.minute(), moved.second()), (17, 45, 9));
        assert_eq!(moved.day(), 28);
    }

    #[test]
    fn years_keep_month_and_day() {
        assert_eq!(add_years(at(2021, 3, 1), 1).unwrap(), at(2022, 3, 1));
        assert_eq!(add_years(at(2019, 3, 1), 1).unwrap(), at(2020, 3, 1));
        assert_eq!(add_years(at(2020, 1, 15), 1).unwrap(), at(2021, 1, 15));
        assert_eq!(add_years(at(1999, 12, 31), 1).unwrap(), at(2000, 12, 31));
        assert_eq!(add_years(at(1899, 6, 1), 2).unwrap(), at(1901, 6, 1));
        assert_eq!(add_years(at(2000, 12, 31), -1).unwrap(), at(1999, 12, 31));
        assert_eq!(add_years(at(2023, 2, 28), -3).unwrap(), at(2020, 2, 28));
    }

    #[test]
    fn years_from_leap_day() {
        assert_eq!(add_years(at(2020, 2, 29), 1).unwrap(), at(2021, 2, 28));
        assert_eq!(add_years(at(2020, 2, 29), 4).unwrap(), at(2024, 2, 29));
        assert_eq!(add_years(at(2024, 2, 29), -1).unwrap(), at(2023, 2, 28));
        assert_eq!(add_years(at(2024, 2, 29), -4).unwrap(), at(2020, 2, 29));
        assert_eq!(add_years(at(1896, 2, 29), 4).unwrap(), at(1900, 2, 28));
    }

    #[test]
    fn fields_apply_largest_first() {
        // Months before days: Jan 31 + 1 month = Feb 28, then + 1 day = Mar 1.
        let p = Period::months(1) + Period::days(1);
        assert_eq!(add(at(2021, 1, 31), &p).unwrap(), at(2021, 3, 1));
    }

    #[test]
    fn combined_periods_are_field_wise() {
        let t = at_hms(2021, 6, 30, 10, 0, 0);
        let combined = Period::days(3) + Period::days(-1);
        assert_eq!(
            add(t, &combined).unwrap(),
            add(t, &Period::days(2)).unwrap()
        );
    }

    #[test]
    fn sub_negates_the_period() {
        let t = at(2021, 3, 31);
        assert_eq!(sub(t, &Period::month()).unwrap(), at(2021, 2, 28));
        assert_eq!(sub(t, &Period::days(31)).unwrap(), at(2021, 2, 28));
    }

    #[test]
    fn zoned_values_keep_their_offset() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2021-01-31 05:00 +09:00 is 2021-01-30 20:00 UTC.
        let zoned = offset.with_ymd_and_hms(2021, 1, 31, 5, 0, 0).unwrap();
        let moved = add_days(zoned, 1).unwrap();
        assert_eq!(moved.offset(), &offset);
        assert_eq!(moved.naive_local(), at_hms(2021, 2, 1, 5, 0, 0));

        // Months follow the absolute (UTC) calendar.
        let moved = add_months(zoned, 1).unwrap();
        assert_eq!(moved.naive_utc(), at_hms(2021, 2, 28, 20, 0, 0));
        assert_eq!(moved.offset(), &offset);
    }

    #[test]
    fn timestamps_go_through_calendar_fields() {
        let t = Timestamp::from_utc(Utc.with_ymd_and_hms(2021, 1, 31, 0, 0, 0).unwrap());
        let moved = add_months(t, 1).unwrap();
        assert_eq!(
            moved,
            Timestamp::from_utc(Utc.with_ymd_and_hms(2021, 2, 28, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn operators() {
        let mut t = at(2021, 1, 31);
        assert_eq!(t + Period::month(), at(2021, 2, 28));
        assert_eq!(t - Period::year(), at(2020, 1, 31));
        t += Period::weeks(1);
        assert_eq!(t, at(2021, 2, 7));
        t -= Period::days(7);
        assert_eq!(t, at(2021, 1, 31));

        let utc = Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(
            utc + Period::year(),
            Utc.with_ymd_and_hms(2021, 2, 28, 0, 0, 0).unwrap()
        );

        let ts = Timestamp::EPOCH + Period::hours(2);
        assert_eq!(ts.micros(), 7_200_000_000);
    }

    #[test]
    fn overflow_is_an_error() {
        let t = at(2021, 1, 1);
        assert_eq!(add_years(t, i64::MAX), Err(CalendarError::OutOfRange));
        assert_eq!(add_months(t, i64::MAX), Err(CalendarError::OutOfRange));
        assert_eq!(add_days(t, i64::MAX), Err(CalendarError::OutOfRange));
        assert_eq!(
            add_days(Timestamp::from_micros(i64::MAX), 1),
            Err(CalendarError::OutOfRange)
        );
    }

    #[test]
    #[should_panic(expected = "out of representable range")]
    fn operator_panics_on_overflow() {
        let _ = at(2021, 1, 1) + Period::years(i64::MAX);
    }
}
