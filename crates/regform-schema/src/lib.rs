//! # regform-schema — Registration Form Validation
//!
//! A small declarative rule engine. A [`Schema`] is a list of rules per
//! field plus a list of cross-field refinements. Evaluating it against a
//! [`regform_core::FormValues`] record yields a [`ValidationErrors`] map
//! from field to message; an empty map means the form is valid.
//!
//! ## Evaluation Order
//!
//! 1. Each field's rules run in declaration order. The first failing rule
//!    supplies that field's message.
//! 2. Cross-field refinements run afterwards as a post-pass over the whole
//!    record. A refinement reads any fields it likes and attaches its
//!    failure to one designated target field, but only if that field has
//!    no message yet.
//!
//! The per-field evaluator never looks at other fields. Cross-field logic
//! lives entirely in [`CrossFieldRule`].
//!
//! ## Crate Policy
//!
//! - Depends only on `regform-core` internally.
//! - Schema construction is fallible (patterns are compiled eagerly);
//!   evaluation is infallible.

pub mod rules;
pub mod validate;

pub use rules::{CrossFieldRule, FieldRule, FieldValue, EMAIL_PATTERN, PHONE_PATTERN};
pub use validate::{Schema, SchemaBuilder, SchemaError, ValidationErrors};
