//! # State Errors
//!
//! Rejected updates and blocked submissions. A rejected update leaves the
//! form exactly as it was.

use thiserror::Error;

use regform_core::{FieldName, JalaaliDate, RegformError};
use regform_schema::ValidationErrors;

/// An update the form refused to apply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The field is not edited by typing (select, radio, checkbox, date).
    #[error("field {0} is not a typed text field")]
    NotTextField(FieldName),

    /// The city is not in the list offered for the selected country.
    #[error("city {city:?} is not offered for country {country:?}")]
    CityNotOffered {
        /// Currently selected country code.
        country: String,
        /// The rejected city.
        city: String,
    },

    /// The end date precedes the start date's bound.
    #[error("end date {end} is before the earliest allowed date {min}")]
    EndBeforeMinimum {
        /// The rejected end date.
        end: JalaaliDate,
        /// The bound recorded when the start date was picked.
        min: JalaaliDate,
    },

    /// A pasted or programmatic value violated the field's input constraint.
    #[error("value {value:?} rejected by the input constraint on {field}")]
    InputRejected {
        /// The constrained field.
        field: FieldName,
        /// The rejected value.
        value: String,
    },

    /// Error from the core types.
    #[error(transparent)]
    Core(#[from] RegformError),
}

/// Why a submit did not reach the completion routine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// One or more fields are invalid.
    #[error("form has invalid fields:\n{0}")]
    Invalid(ValidationErrors),
}
