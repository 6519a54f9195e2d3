// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendar helpers.
//!
//! A year is a leap year iff it is divisible by 4 and either not divisible
//! by 100 or divisible by 400.  Years before 1 are not supported: the
//! counting functions clamp them to 1 and log a warning.

use log::warn;

/// `true` iff `year` has a 29th of February.
#[inline]
pub const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1–12) of `year`, or 0 for an invalid month.
pub const fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Number of leap days in the years `1..year`.
///
/// `year` values below 1 are clamped to 1.
///
/// ```
/// assert_eq!(caltime::count_leap_days_before_year(2001), 485);
/// ```
pub fn count_leap_days_before_year(year: i64) -> i64 {
    let year = if year < 1 {
        warn!("year {year} precedes year 1, counting leap days from year 1");
        1
    } else {
        year
    };
    let y = year - 1;
    y / 4 - y / 100 + y / 400
}

/// Number of leap days in the years `start..end`.
///
/// The bounds are swapped, with a warning, if `start > end`.
///
/// ```
/// assert_eq!(caltime::count_leap_days_between_years(1900, 2000), 24);
/// ```
pub fn count_leap_days_between_years(start: i64, end: i64) -> i64 {
    let (start, end) = if start > end {
        warn!("leap day range starts after it ends ({start} > {end}), swapping");
        (end, start)
    } else {
        (start, end)
    };
    count_leap_days_before_year(end) - count_leap_days_before_year(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(is_leap_year(1600));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2021, 1), 31);
        assert_eq!(days_in_month(2021, 2), 28);
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2021, 4), 30);
        assert_eq!(days_in_month(2021, 12), 31);
        assert_eq!(days_in_month(2021, 13), 0);
        assert_eq!(days_in_month(2021, 0), 0);
    }

    #[test]
    fn leap_days_before_year() {
        assert_eq!(count_leap_days_before_year(1), 0);
        assert_eq!(count_leap_days_before_year(5), 0);
        assert_eq!(count_leap_days_before_year(6), 1);
        assert_eq!(count_leap_days_before_year(2001), 485);
    }

    #[test]
    fn leap_days_before_year_clamps_below_one() {
        assert_eq!(count_leap_days_before_year(0), 0);
        assert_eq!(count_leap_days_before_year(-400), 0);
    }

    #[test]
    fn leap_days_between_years() {
        assert_eq!(count_leap_days_between_years(1900, 2000), 24);
        assert_eq!(count_leap_days_between_years(2000, 2001), 1);
        assert_eq!(count_leap_days_between_years(2001, 2004), 0);
        assert_eq!(count_leap_days_between_years(2001, 2005), 1);
        assert_eq!(count_leap_days_between_years(2000, 2000), 0);
    }

    #[test]
    fn leap_days_between_years_swaps_reversed_bounds() {
        assert_eq!(
            count_leap_days_between_years(2000, 1900),
            count_leap_days_between_years(1900, 2000)
        );
    }

    #[test]
    fn leap_days_between_matches_leap_year_rule() {
        for start in 1890..1910 {
            for end in start..start + 420 {
                let expected = (start..end).filter(|&y| is_leap_year(y)).count() as i64;
                assert_eq!(count_leap_days_between_years(start, end), expected);
            }
        }
    }
}
