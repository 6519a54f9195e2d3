// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Abstract calendar periods.
//!
//! A [`Period`] is a signed amount of calendar time spread over the nine
//! [`Field`]s, from microseconds up to years.  Only the sub-week fields map to
//! a fixed number of microseconds; months and years can only be resolved
//! against a concrete calendar date (see [`add`](crate::add)).
//!
//! Periods are combined field by field.  No normalization ever happens:
//! `Period::days(90)` stays ninety days and is never folded into months.

use crate::error::CalendarError;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Field
// ═══════════════════════════════════════════════════════════════════════════

/// A calendar field, ordered from the smallest unit to the largest.
///
/// The discriminant is the slot index inside a [`Period`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Field {
    Microsecond = 0,
    Millisecond = 1,
    Second = 2,
    Minute = 3,
    Hour = 4,
    Day = 5,
    Week = 6,
    Month = 7,
    Year = 8,
}

impl Field {
    /// Number of fields held by a [`Period`].
    pub const COUNT: usize = 9;

    /// Every field, smallest first.
    pub const ALL: [Field; Field::COUNT] = [
        Field::Microsecond,
        Field::Millisecond,
        Field::Second,
        Field::Minute,
        Field::Hour,
        Field::Day,
        Field::Week,
        Field::Month,
        Field::Year,
    ];

    /// Slot index of this field.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Field stored at `index`, if any.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Field> {
        if index < Field::COUNT {
            Some(Field::ALL[index])
        } else {
            None
        }
    }

    /// Singular lower-case name (`"day"`, `"month"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Field::Microsecond => "microsecond",
            Field::Millisecond => "millisecond",
            Field::Second => "second",
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::Day => "day",
            Field::Week => "week",
            Field::Month => "month",
            Field::Year => "year",
        }
    }

    /// Length of one unit in microseconds, for the fields that have one.
    ///
    /// Months and years vary with the calendar and return `None`.
    pub const fn fixed_micros(self) -> Option<i64> {
        match self {
            Field::Microsecond => Some(1),
            Field::Millisecond => Some(1_000),
            Field::Second => Some(1_000_000),
            Field::Minute => Some(60_000_000),
            Field::Hour => Some(3_600_000_000),
            Field::Day => Some(86_400_000_000),
            Field::Week => Some(7 * 86_400_000_000),
            Field::Month | Field::Year => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = CalendarError;

    /// Accepts the singular or plural lower-case name, ignoring surrounding
    /// whitespace and ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let singular = lowered.strip_suffix('s').unwrap_or(&lowered);
        Field::ALL
            .into_iter()
            .find(|field| field.name() == singular)
            .ok_or_else(|| CalendarError::UnknownField(s.to_owned()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Period
// ═══════════════════════════════════════════════════════════════════════════

/// A signed, multi-field amount of calendar time.
///
/// # Examples
///
/// ```
/// use caltime::{Field, Period};
///
/// let mut period = Period::months(2) + Period::days(-3);
/// assert_eq!(period.get(Field::Month), 2);
/// assert_eq!(period.get(Field::Day), -3);
///
/// period.clear(Field::Month);
/// period.add_to(Field::Day, 3);
/// assert!(period.is_empty());
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Period {
    fields: [i64; Field::COUNT],
}

impl Period {
    // ── constructors ──────────────────────────────────────────────────

    /// The empty period.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fields: [0; Field::COUNT],
        }
    }

    /// A period holding `amount` in `field` and zero everywhere else.
    #[inline]
    pub const fn of(field: Field, amount: i64) -> Self {
        let mut fields = [0; Field::COUNT];
        fields[field.index()] = amount;
        Self { fields }
    }

    /// One microsecond.
    pub const fn microsecond() -> Self {
        Self::of(Field::Microsecond, 1)
    }

    /// `amount` microseconds.
    pub const fn microseconds(amount: i64) -> Self {
        Self::of(Field::Microsecond, amount)
    }

    /// One millisecond.
    pub const fn millisecond() -> Self {
        Self::of(Field::Millisecond, 1)
    }

    /// `amount` milliseconds.
    pub const fn milliseconds(amount: i64) -> Self {
        Self::of(Field::Millisecond, amount)
    }

    /// One second.
    pub const fn second() -> Self {
        Self::of(Field::Second, 1)
    }

    /// `amount` seconds.
    pub const fn seconds(amount: i64) -> Self {
        Self::of(Field::Second, amount)
    }

    /// One minute.
    pub const fn minute() -> Self {
        Self::of(Field::Minute, 1)
    }

    /// `amount` minutes.
    pub const fn minutes(amount: i64) -> Self {
        Self::of(Field::Minute, amount)
    }

    /// One hour.
    pub const fn hour() -> Self {
        Self::of(Field::Hour, 1)
    }

    /// `amount` hours.
    pub const fn hours(amount: i64) -> Self {
        Self::of(Field::Hour, amount)
    }

    /// One day.
    pub const fn day() -> Self {
        Self::of(Field::Day, 1)
    }

    /// `amount` days.
    pub const fn days(amount: i64) -> Self {
        Self::of(Field::Day, amount)
    }

    /// One week.
    pub const fn week() -> Self {
        Self::of(Field::Week, 1)
    }

    /// `amount` weeks.
    pub const fn weeks(amount: i64) -> Self {
        Self::of(Field::Week, amount)
    }

    /// One month.
    pub const fn month() -> Self {
        Self::of(Field::Month, 1)
    }

    /// `amount` months.
    pub const fn months(amount: i64) -> Self {
        Self::of(Field::Month, amount)
    }

    /// One year.
    pub const fn year() -> Self {
        Self::of(Field::Year, 1)
    }

    /// `amount` years.
    pub const fn years(amount: i64) -> Self {
        Self::of(Field::Year, amount)
    }

    // ── field access ──────────────────────────────────────────────────

    /// Overwrite the amount stored in `field`.
    #[inline]
    pub fn set(&mut self, field: Field, amount: i64) {
        self.fields[field.index()] = amount;
    }

    /// Amount stored in `field`.
    #[inline]
    pub const fn get(&self, field: Field) -> i64 {
        self.fields[field.index()]
    }

    /// Accumulate `amount` (possibly negative) into `field`.
    #[inline]
    pub fn add_to(&mut self, field: Field, amount: i64) {
        self.fields[field.index()] += amount;
    }

    /// Reset `field` to zero.
    #[inline]
    pub fn clear(&mut self, field: Field) {
        self.fields[field.index()] = 0;
    }

    /// `true` iff every field is zero.
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|&amount| amount == 0)
    }

    /// Accumulates `amount` into the Microsecond field.
    pub fn add_microseconds(&mut self, amount: i64) {
        self.add_to(Field::Microsecond, amount);
    }

    /// Accumulates `amount` into the Millisecond field.
    pub fn add_milliseconds(&mut self, amount: i64) {
        self.add_to(Field::Millisecond, amount);
    }

    /// Accumulates `amount` into the Second field.
    pub fn add_seconds(&mut self, amount: i64) {
        self.add_to(Field::Second, amount);
    }

    /// Accumulates `amount` into the Minute field.
    pub fn add_minutes(&mut self, amount: i64) {
        self.add_to(Field::Minute, amount);
    }

    /// Accumulates `amount` into the Hour field.
    pub fn add_hours(&mut self, amount: i64) {
        self.add_to(Field::Hour, amount);
    }

    /// Accumulates `amount` into the Day field.
    pub fn add_days(&mut self, amount: i64) {
        self.add_to(Field::Day, amount);
    }

    /// Accumulates `amount` into the Week field.
    pub fn add_weeks(&mut self, amount: i64) {
        self.add_to(Field::Week, amount);
    }

    /// Accumulates `amount` into the Month field.
    pub fn add_months(&mut self, amount: i64) {
        self.add_to(Field::Month, amount);
    }

    /// Accumulates `amount` into the Year field.
    pub fn add_years(&mut self, amount: i64) {
        self.add_to(Field::Year, amount);
    }

    /// Non-zero fields, largest unit first.
    ///
    /// This is the order in which [`add`](crate::add) applies a period.
    pub fn iter(&self) -> impl Iterator<Item = (Field, i64)> {
        let fields = self.fields;
        Field::ALL
            .into_iter()
            .rev()
            .map(move |field| (field, fields[field.index()]))
            .filter(|&(_, amount)| amount != 0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        for (i, (field, amount)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let plural = if amount.abs() == 1 { "" } else { "s" };
            write!(f, "{amount} {field}{plural}")?;
        }
        Ok(())
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add for Period {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for Period {
    fn add_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.fields.iter_mut().zip(rhs.fields) {
            *lhs += rhs;
        }
    }
}

impl Sub for Period {
    type Output = Self;
    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl SubAssign for Period {
    fn sub_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.fields.iter_mut().zip(rhs.fields) {
            *lhs -= rhs;
        }
    }
}

impl Neg for Period {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self {
            fields: self.fields.map(|amount| -amount),
        }
    }
}

impl From<(Field, i64)> for Period {
    fn from((field, amount): (Field, i64)) -> Self {
        Self::of(field, amount)
    }
}
