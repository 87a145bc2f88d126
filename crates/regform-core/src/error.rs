//! # Error Types
//!
//! Errors raised by the foundational types. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! Field-level validation failures are not errors in this sense: they are
//! data (a message per field) produced by `regform-schema`. The types here
//! cover malformed input to the core types themselves.

use thiserror::Error;

/// Top-level error type for the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegformError {
    /// A date could not be constructed or parsed.
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// A string did not name a known form field.
    #[error("unknown field name: {0:?}")]
    UnknownField(String),

    /// A string did not name a known gender option.
    #[error("unknown gender: {0:?}")]
    UnknownGender(String),

    /// A field was addressed as text but holds a non-text value.
    #[error("field {0} is not a text field")]
    NotTextField(String),
}

/// Error constructing or parsing a Jalaali date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Year outside the range where the calendar conversion is verified.
    #[error("jalaali year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
        /// Smallest supported year.
        min: i32,
        /// Largest supported year.
        max: i32,
    },

    /// Month outside 1..=12.
    #[error("jalaali month {0} is outside 1..=12")]
    MonthOutOfRange(u32),

    /// Day past the end of the month.
    #[error("day {day} does not exist in {year}/{month:02} (month has {length} days)")]
    DayOutOfRange {
        /// Year of the rejected date.
        year: i32,
        /// Month of the rejected date.
        month: u32,
        /// The rejected day.
        day: u32,
        /// Number of days in that month.
        length: u32,
    },

    /// The calendar backend could not represent the date.
    #[error("date {0} is not representable on both calendars")]
    Unrepresentable(String),

    /// Text did not have the `YYYY/MM/DD` shape.
    #[error("malformed jalaali date {input:?}: {reason}")]
    Malformed {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
}
