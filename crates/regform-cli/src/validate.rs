//! # Validate Subcommand
//!
//! Loads a `FormValues` document and runs the registration schema over it,
//! exactly as the form does on submit.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use regform_core::{FormValues, Locale};
use regform_schema::{Schema, ValidationErrors};

/// Arguments for the `regform validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Form document to validate (`.json`, `.yaml` or `.yml`).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the document is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, locale: Locale) -> Result<u8> {
    let errors = validate_document(&args.path, locale)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&args.path, &errors)),
        OutputFormat::Json => println!("{}", render_json(&errors)?),
    }

    Ok(if errors.is_empty() { 0 } else { 1 })
}

/// Load `path` and evaluate the registration schema against it.
pub fn validate_document(path: &Path, locale: Locale) -> Result<ValidationErrors> {
    let values: FormValues = crate::load_document(path)?;
    let schema = Schema::registration(locale).context("failed to build registration schema")?;
    let errors = schema.evaluate(&values);
    tracing::info!(
        path = %path.display(),
        error_count = errors.len(),
        "validated form document"
    );
    Ok(errors)
}

fn render_text(path: &Path, errors: &ValidationErrors) -> String {
    if errors.is_empty() {
        return format!("OK: {}\n", path.display());
    }
    let mut out = format!("FAIL: {} ({} field(s))\n", path.display(), errors.len());
    for (field, message) in errors.iter() {
        out.push_str(&format!("  {field}: {message}\n"));
    }
    out
}

fn render_json(errors: &ValidationErrors) -> Result<String> {
    let report = serde_json::json!({
        "valid": errors.is_empty(),
        "errors": errors,
    });
    serde_json::to_string_pretty(&report).context("failed to serialize report")
}
