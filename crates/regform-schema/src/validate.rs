//! # Schema Evaluation
//!
//! Builds the registration schema and evaluates it against a form record.
//!
//! Evaluation regenerates the error map wholesale on every call. Nothing is
//! cached between passes: the form controller calls [`Schema::evaluate`]
//! after every accepted change.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use regform_core::{CountryCityTable, FieldName, FormValues, Gender, Locale, Messages};

use crate::rules::{CrossFieldRule, FieldRule, FieldValue, PHONE_PATTERN};

/// Error building a schema or validating against it.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    /// A pattern rule's regex did not compile.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// A boolean rule was attached to a text field, or the reverse.
    #[error("rule '{rule}' cannot apply to field '{field}'")]
    RuleTypeMismatch {
        /// Field the rule was attached to.
        field: FieldName,
        /// Rule name.
        rule: &'static str,
    },

    /// The record did not satisfy the schema.
    #[error("validation failed:\n{0}")]
    ValidationFailed(ValidationErrors),
}

/// Field-keyed validation messages, ordered by form position.
///
/// At most one message per field. An empty map means the record is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldName, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with an error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    /// Iterate `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Fields with an error, in form order.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.errors.keys().copied()
    }

    /// Record `message` for `field` unless the field already has one.
    ///
    /// Returns whether the message was recorded.
    pub fn insert_if_absent(&mut self, field: FieldName, message: impl Into<String>) -> bool {
        if self.errors.contains_key(&field) {
            return false;
        }
        self.errors.insert(field, message.into());
        true
    }

    /// Consumes self and returns the inner map.
    pub fn into_inner(self) -> BTreeMap<FieldName, String> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {field}: {message}")?;
        }
        Ok(())
    }
}

/// A declarative rule set over [`FormValues`].
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<(FieldName, Vec<FieldRule>)>,
    refinements: Vec<CrossFieldRule>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// The registration form's rule set with messages in `locale`.
    ///
    /// Chronological order of the two dates is not part of the schema; the
    /// date-range state machine enforces it when the end date is picked.
    pub fn registration(locale: Locale) -> Result<Self, SchemaError> {
        let m = Messages::for_locale(locale);
        Schema::builder()
            .rule(FieldName::UserName, FieldRule::min_length(3, m.user_name_min))
            .rule(FieldName::Password, FieldRule::min_length(6, m.password_min))
            .rule(
                FieldName::RepeatPassword,
                FieldRule::min_length(6, m.repeat_password_min),
            )
            .rule(FieldName::Email, FieldRule::email(m.email_invalid)?)
            .rule(FieldName::Phone, FieldRule::pattern(PHONE_PATTERN, m.phone_invalid)?)
            .rule(
                FieldName::Gender,
                FieldRule::one_of(
                    [Gender::Male.as_str(), Gender::Female.as_str()],
                    m.gender_invalid,
                ),
            )
            .rule(FieldName::Accept, FieldRule::must_be_true(m.accept_required))
            .rule(FieldName::Country, FieldRule::required(m.country_required))
            .rule(FieldName::City, FieldRule::required(m.city_required))
            .rule(FieldName::StartDate, FieldRule::required(m.start_date_required))
            .rule(FieldName::EndDate, FieldRule::required(m.end_date_required))
            .refine(CrossFieldRule::equals(
                FieldName::Password,
                FieldName::RepeatPassword,
                FieldName::RepeatPassword,
                m.password_mismatch,
            ))
            .refine(CrossFieldRule::city_in_country(
                CountryCityTable::builtin(),
                m.city_not_in_country,
            ))
            .build()
    }

    /// Evaluate every rule and return the error map.
    pub fn evaluate(&self, values: &FormValues) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for (field, rules) in &self.fields {
            let value = FieldValue::of(values, *field);
            if let Some(failed) = rules.iter().find(|r| !r.check(value)) {
                errors.insert_if_absent(*field, failed.message());
            }
        }

        // Post-pass: refinements only fill slots the field rules left empty.
        for refinement in &self.refinements {
            if !refinement.check(values) {
                errors.insert_if_absent(refinement.target(), refinement.message());
            }
        }

        tracing::trace!(error_count = errors.len(), "schema evaluated");
        errors
    }

    /// Evaluate and convert a non-empty error map into an error.
    pub fn validate(&self, values: &FormValues) -> Result<(), SchemaError> {
        let errors = self.evaluate(values);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed(errors))
        }
    }

    /// Fields that carry at least one rule, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.iter().map(|(f, _)| *f)
    }

    pub fn refinements(&self) -> &[CrossFieldRule] {
        &self.refinements
    }
}

/// Incremental [`Schema`] construction.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fields: Vec<(FieldName, Vec<FieldRule>)>,
    refinements: Vec<CrossFieldRule>,
}

impl SchemaBuilder {
    /// Append a rule to `field`'s rule list.
    pub fn rule(mut self, field: FieldName, rule: FieldRule) -> Self {
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some((_, rules)) => rules.push(rule),
            None => self.fields.push((field, vec![rule])),
        }
        self
    }

    /// Append a cross-field refinement.
    pub fn refine(mut self, rule: CrossFieldRule) -> Self {
        self.refinements.push(rule);
        self
    }

    /// Finish, rejecting rules attached to the wrong kind of field.
    pub fn build(self) -> Result<Schema, SchemaError> {
        for (field, rules) in &self.fields {
            let field_is_flag = *field == FieldName::Accept;
            if let Some(bad) = rules.iter().find(|r| r.expects_flag() != field_is_flag) {
                return Err(SchemaError::RuleTypeMismatch {
                    field: *field,
                    rule: bad.name(),
                });
            }
        }
        Ok(Schema {
            fields: self.fields,
            refinements: self.refinements,
        })
    }
}
