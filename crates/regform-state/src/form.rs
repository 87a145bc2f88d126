//! # Registration Form Controller
//!
//! Owns one [`FormValues`] record and every piece of state derived from it.
//! All mutation goes through the entry points below, each of which maps to
//! a UI event: a keystroke, a paste, a selection, a checkbox toggle, a
//! submit. After every accepted change the whole schema is re-evaluated
//! and the error map replaced.
//!
//! Errors are always computed for every field. Which ones a UI shows is a
//! separate question: [`RegistrationForm::visible_error`] reveals a field's
//! message once the field was changed or a submit was attempted.

use std::collections::{BTreeMap, BTreeSet};

use regform_core::{CountryCityTable, FieldName, FormValues, Gender, JalaaliDate};
use regform_schema::{Schema, ValidationErrors};

use crate::cascade::{CitySelector, EmptyCountryPolicy};
use crate::date_range::DateRange;
use crate::error::{StateError, SubmitError};
use crate::input::{InputConstraint, Key, KeyOutcome, Selection, TextInput};

/// Receives the record of a validated submit.
pub trait SubmitHandler {
    fn on_submit(&mut self, values: &FormValues);
}

impl<F> SubmitHandler for F
where
    F: FnMut(&FormValues),
{
    fn on_submit(&mut self, values: &FormValues) {
        self(values)
    }
}

/// Logs the submitted record and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSubmission;

impl SubmitHandler for LogSubmission {
    fn on_submit(&mut self, values: &FormValues) {
        tracing::info!(record = ?values, "form submitted");
    }
}

/// The registration form.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    schema: Schema,
    values: FormValues,
    inputs: BTreeMap<FieldName, TextInput>,
    cities: CitySelector,
    dates: DateRange,
    errors: ValidationErrors,
    touched: BTreeSet<FieldName>,
    submit_attempted: bool,
}

impl RegistrationForm {
    /// A freshly mounted form with the default empty-country policy.
    pub fn new(schema: Schema) -> Self {
        Self::with_policy(schema, EmptyCountryPolicy::default())
    }

    pub fn with_policy(schema: Schema, policy: EmptyCountryPolicy) -> Self {
        let inputs = FieldName::all()
            .iter()
            .filter(|f| f.is_typed_text())
            .map(|f| {
                let constraint = match f {
                    FieldName::Phone => InputConstraint::phone(),
                    _ => InputConstraint::none(),
                };
                (*f, TextInput::new(constraint))
            })
            .collect();

        let values = FormValues::default();
        let errors = schema.evaluate(&values);
        Self {
            schema,
            values,
            inputs,
            cities: CitySelector::new(CountryCityTable::builtin(), policy),
            dates: DateRange::new(),
            errors,
            touched: BTreeSet::new(),
            submit_attempted: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Full error map from the latest evaluation.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The message a UI should show next to `field` right now.
    pub fn visible_error(&self, field: FieldName) -> Option<&str> {
        if self.submit_attempted || self.touched.contains(&field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.touched.contains(&field)
    }

    /// Cities offered for the selected country.
    pub fn cities(&self) -> &'static [&'static str] {
        self.cities.cities()
    }

    /// Earliest date the end picker offers.
    pub fn min_end_date(&self) -> Option<JalaaliDate> {
        self.dates.min_end()
    }

    pub fn date_range(&self) -> &DateRange {
        &self.dates
    }

    /// Text buffer behind a typed field.
    pub fn input(&self, field: FieldName) -> Option<&TextInput> {
        self.inputs.get(&field)
    }

    fn changed(&mut self, field: FieldName) {
        self.touched.insert(field);
        self.errors = self.schema.evaluate(&self.values);
        tracing::trace!(%field, error_count = self.errors.len(), "field changed");
    }

    fn input_mut(&mut self, field: FieldName) -> Result<&mut TextInput, StateError> {
        self.inputs
            .get_mut(&field)
            .ok_or(StateError::NotTextField(field))
    }

    fn sync_input(&mut self, field: FieldName) -> Result<(), StateError> {
        let value = self.input_mut(field)?.value().to_string();
        self.values.set_text(field, value)?;
        self.changed(field);
        Ok(())
    }

    /// Replace a typed field's value, as a paste over everything or a
    /// programmatic change would.
    pub fn set_text(&mut self, field: FieldName, value: &str) -> Result<(), StateError> {
        if !self.input_mut(field)?.replace(value) {
            tracing::debug!(%field, value, "value rejected by input constraint");
            return Err(StateError::InputRejected {
                field,
                value: value.to_string(),
            });
        }
        self.sync_input(field)
    }

    /// Paste at the field's current selection.
    pub fn paste(&mut self, field: FieldName, text: &str) -> Result<(), StateError> {
        if !self.input_mut(field)?.paste(text) {
            return Err(StateError::InputRejected {
                field,
                value: text.to_string(),
            });
        }
        self.sync_input(field)
    }

    /// Move the caret or selection inside a typed field.
    pub fn select_range(
        &mut self,
        field: FieldName,
        selection: Selection,
    ) -> Result<(), StateError> {
        self.input_mut(field)?.select(selection);
        Ok(())
    }

    /// Deliver one key press to a typed field.
    pub fn press_key(&mut self, field: FieldName, key: &Key) -> Result<KeyOutcome, StateError> {
        let outcome = self.input_mut(field)?.press(key);
        match outcome {
            KeyOutcome::Inserted | KeyOutcome::Deleted => self.sync_input(field)?,
            KeyOutcome::Rejected => tracing::debug!(%field, ?key, "key rejected"),
            KeyOutcome::Moved | KeyOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.values.gender = gender.as_str().to_string();
        self.changed(FieldName::Gender);
    }

    pub fn set_accept(&mut self, accept: bool) {
        self.values.accept = accept;
        self.changed(FieldName::Accept);
    }

    /// Choose a country; the city list follows.
    pub fn select_country(&mut self, code: &str) {
        self.cities.on_country_change(&mut self.values, code);
        self.changed(FieldName::Country);
    }

    pub fn select_city(&mut self, city: &str) -> Result<(), StateError> {
        self.cities.select_city(&mut self.values, city)?;
        self.changed(FieldName::City);
        Ok(())
    }

    /// Pick the start date; clears the end date.
    pub fn select_start_date(&mut self, date: JalaaliDate) {
        self.dates.select_start(&mut self.values, date);
        self.changed(FieldName::StartDate);
    }

    pub fn select_end_date(&mut self, date: JalaaliDate) -> Result<(), StateError> {
        self.dates.select_end(&mut self.values, date)?;
        self.changed(FieldName::EndDate);
        Ok(())
    }

    /// Hand the record to `handler` if the form validates.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] with the full error map when any
    /// field fails; `handler` is not called.
    pub fn submit<H: SubmitHandler>(&mut self, mut handler: H) -> Result<(), SubmitError> {
        self.submit_attempted = true;
        self.errors = self.schema.evaluate(&self.values);

        if !self.errors.is_empty() {
            tracing::warn!(
                invalid_fields = ?self.errors.fields().map(|f| f.as_str()).collect::<Vec<_>>(),
                "submit blocked"
            );
            return Err(SubmitError::Invalid(self.errors.clone()));
        }

        tracing::info!("form validated; handing record to completion routine");
        handler.on_submit(&self.values);
        Ok(())
    }

    /// Discard the form, keeping only the record.
    pub fn into_values(self) -> FormValues {
        self.values
    }
}
