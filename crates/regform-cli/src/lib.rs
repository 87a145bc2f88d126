//! # regform-cli — CLI Tool for the Registration Form
//!
//! Provides the `regform` command-line interface over the form's core
//! types, schema and state machines.
//!
//! ## Subcommands
//!
//! - `regform validate` — Check a form document against the registration schema.
//! - `regform convert-date` — Jalaali picker date to stored Gregorian string.
//! - `regform cities` — List the country/city table.
//! - `regform replay` — Drive a `RegistrationForm` through a scripted event list.
//!
//! ```bash
//! regform validate submission.yaml --format json
//! regform convert-date 1403/01/01
//! regform cities IR
//! regform -vv replay signup.yaml
//! ```
//!
//! Every handler returns an exit code: 0 on success, 1 when the input was
//! processed but found wanting. Operational failures bubble up as
//! `anyhow::Error` and are reported by `main`.

pub mod cities;
pub mod convert;
pub mod replay;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Read and parse a JSON or YAML document, chosen by file extension.
///
/// `.yaml` and `.yml` are parsed as YAML; anything else as JSON.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML in {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))
    }
}
