//! # Replay Subcommand
//!
//! Drives a [`RegistrationForm`] through a scripted list of UI events and
//! reports what the form ended up holding. Useful for reproducing a user
//! session without a browser.
//!
//! ## Script Format
//!
//! ```yaml
//! locale: en              # optional, overrides --locale
//! empty_country: reset    # optional: reset | preserve_stale
//! events:
//!   - type: { field: userName, text: sara }
//!   - keys: { field: phone, keys: ["0", "9", "Backspace", "9"] }
//!   - text: { field: email, value: sara@example.com }
//!   - paste: { field: phone, text: "123" }
//!   - gender: female
//!   - accept: true
//!   - country: IR
//!   - city: تهران
//!   - start_date: 1403/01/01
//!   - end_date: 1403/01/10
//!   - submit
//! ```
//!
//! `type` presses one key per character; `text` replaces the value as a
//! programmatic change would.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use regform_core::{FieldName, FormValues, Gender, JalaaliDate, Locale};
use regform_schema::{Schema, ValidationErrors};
use regform_state::{
    EmptyCountryPolicy, Key, KeyOutcome, LogSubmission, RegistrationForm, StateError,
    SubmitError, SubmitHandler,
};

/// Arguments for the `regform replay` subcommand.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Event script (`.json`, `.yaml` or `.yml`).
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
}

/// A scripted session.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub locale: Option<Locale>,
    #[serde(default)]
    pub empty_country: EmptyCountryPolicy,
    /// Single-key maps (`- country: IR`) or bare unit names (`- submit`).
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub events: Vec<Event>,
}

/// One UI event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Press one key per character of `text`.
    Type { field: FieldName, text: String },
    /// Press the given keys in order.
    Keys { field: FieldName, keys: Vec<Key> },
    /// Replace the whole value.
    Text { field: FieldName, value: String },
    /// Paste at the current caret.
    Paste { field: FieldName, text: String },
    Gender(Gender),
    Accept(bool),
    Country(String),
    City(String),
    StartDate(JalaaliDate),
    EndDate(JalaaliDate),
    Submit,
}

/// Outcome of a submit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SubmitOutcome {
    Delivered,
    Blocked { errors: ValidationErrors },
}

/// What happened during a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Record held by the form after the last event.
    pub values: FormValues,
    /// Errors after the last event.
    pub errors: ValidationErrors,
    /// Human-readable description of each rejected event, with its index.
    pub rejected: Vec<String>,
    /// One entry per submit event, in order.
    pub submits: Vec<SubmitOutcome>,
}

impl ReplayReport {
    /// Whether the session went through without a rejection or blocked submit.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
            && self
                .submits
                .iter()
                .all(|s| matches!(s, SubmitOutcome::Delivered))
    }
}

/// Execute the replay subcommand.
///
/// Returns exit code 1 if any event was rejected or any submit blocked.
pub fn run_replay(args: &ReplayArgs, locale: Locale) -> Result<u8> {
    let script: ReplayScript = crate::load_document(&args.script)?;
    tracing::info!(
        script = %args.script.display(),
        events = script.events.len(),
        "replaying event script"
    );

    let report = replay(&script, locale, LogSubmission)?;
    let rendered = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{rendered}");

    Ok(if report.is_clean() { 0 } else { 1 })
}

/// Apply every event in `script` to a fresh form.
///
/// `locale` applies unless the script names its own. Delivered submits go
/// to `handler`.
pub fn replay<H: SubmitHandler>(
    script: &ReplayScript,
    locale: Locale,
    mut handler: H,
) -> Result<ReplayReport> {
    let locale = script.locale.unwrap_or(locale);
    let schema = Schema::registration(locale).context("failed to build registration schema")?;
    let mut form = RegistrationForm::with_policy(schema, script.empty_country);
    let mut rejected = Vec::new();
    let mut submits = Vec::new();

    for (index, event) in script.events.iter().enumerate() {
        if let Event::Submit = event {
            let outcome = match form.submit(|values: &FormValues| handler.on_submit(values)) {
                Ok(()) => SubmitOutcome::Delivered,
                Err(SubmitError::Invalid(errors)) => SubmitOutcome::Blocked { errors },
            };
            submits.push(outcome);
            continue;
        }

        if let Err(reason) = apply(&mut form, event) {
            tracing::warn!(index, %reason, "event rejected");
            rejected.push(format!("#{index}: {reason}"));
        }
    }

    Ok(ReplayReport {
        values: form.values().clone(),
        errors: form.errors().clone(),
        rejected,
        submits,
    })
}

fn press_all<'a>(
    form: &mut RegistrationForm,
    field: FieldName,
    keys: impl IntoIterator<Item = &'a Key>,
) -> std::result::Result<(), String> {
    for key in keys {
        if form.press_key(field, key).map_err(|e| e.to_string())? == KeyOutcome::Rejected {
            return Err(format!("key {:?} rejected on {field}", String::from(key.clone())));
        }
    }
    Ok(())
}

fn apply(form: &mut RegistrationForm, event: &Event) -> std::result::Result<(), String> {
    let state = |r: std::result::Result<(), StateError>| r.map_err(|e| e.to_string());
    match event {
        Event::Type { field, text } => {
            let keys: Vec<Key> = text.chars().map(Key::Char).collect();
            press_all(form, *field, &keys)
        }
        Event::Keys { field, keys } => press_all(form, *field, keys),
        Event::Text { field, value } => state(form.set_text(*field, value)),
        Event::Paste { field, text } => state(form.paste(*field, text)),
        Event::Gender(gender) => {
            form.set_gender(*gender);
            Ok(())
        }
        Event::Accept(accept) => {
            form.set_accept(*accept);
            Ok(())
        }
        Event::Country(code) => {
            form.select_country(code);
            Ok(())
        }
        Event::City(city) => state(form.select_city(city)),
        Event::StartDate(date) => {
            form.select_start_date(*date);
            Ok(())
        }
        Event::EndDate(date) => state(form.select_end_date(*date)),
        Event::Submit => Ok(()),
    }
}
