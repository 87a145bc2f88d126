//! # regform-core — Foundational Types for the Registration Form
//!
//! This crate is the leaf of the workspace. It defines the vocabulary every
//! other crate speaks: which fields exist, what a filled-in form looks like,
//! which countries and cities can be chosen, and how a date picked on the
//! Jalaali (Persian) calendar maps to a Gregorian `YYYY-MM-DD` string.
//!
//! ## Key Design Principles
//!
//! 1. **Closed field vocabulary.** `FieldName` is a single enum with eleven
//!    variants. Error maps, touched-sets and schemas are all keyed by it,
//!    so a misspelled field name is a compile error, not a silent miss.
//!
//! 2. **Validated dates.** A `JalaaliDate` can only be constructed for a
//!    real calendar day in the supported range. Conversion to Gregorian is
//!    therefore total.
//!
//! 3. **Static geography.** The country/city table is a `'static` slice
//!    compiled into the binary. Nothing mutates it at runtime.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `regform-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod calendar;
pub mod error;
pub mod field;
pub mod form;
pub mod geography;
pub mod locale;

// Re-export primary types for ergonomic imports.
pub use calendar::{convert_date, is_leap_year, month_length, JalaaliDate};
pub use error::{CalendarError, RegformError};
pub use field::FieldName;
pub use form::{FormValues, Gender};
pub use geography::{CountryCityTable, CountryEntry};
pub use locale::{Locale, Messages};
