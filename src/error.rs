// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by the calendar arithmetic, rounding and parsing code.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Failures reported by the fallible operations of this crate.
///
/// Everything else (negative amounts, empty periods in [`add`](crate::add),
/// degenerate intervals) is accepted without error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The result is not representable by the target date-time type.
    #[error("result out of representable range")]
    OutOfRange,

    /// A rounding grid must be at least one microsecond wide.
    #[error("rounding granularity must be a positive number of microseconds, got {0}")]
    InvalidGranularity(i64),

    /// A bounded instance generator was given a period with every field at zero.
    #[error("cannot generate bounded instances from an empty period")]
    EmptyPeriod,

    /// A bounded instance generator was given a period that does not move time forward.
    #[error("period {0} does not advance the running instant")]
    NonAdvancingPeriod(String),

    /// A field name that does not match any [`Field`](crate::Field).
    #[error("unknown period field: {0:?}")]
    UnknownField(String),

    /// A format string holds a specifier chrono does not know.
    #[error("invalid format string: {0:?}")]
    InvalidFormat(String),

    /// A timestamp string did not match the requested format.
    #[error("failed to parse timestamp: {0}")]
    Parse(#[from] chrono::ParseError),
}
