//! # CLI Command Tests
//!
//! Exercises the same handlers the `regform` binary dispatches to, against
//! documents and scripts written to a temporary directory.

use std::path::PathBuf;

use regform_cli::cities::{run_cities, CitiesArgs};
use regform_cli::convert::{run_convert, ConvertArgs};
use regform_cli::replay::{replay, run_replay, ReplayArgs, ReplayScript, SubmitOutcome};
use regform_cli::validate::{run_validate, validate_document, OutputFormat, ValidateArgs};
use regform_core::{FieldName, FormValues, Locale};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const SESSION: &str = r#"
events:
  - type: { field: userName, text: reza }
  - type: { field: password, text: hunter22 }
  - type: { field: repeatPassword, text: hunter22 }
  - type: { field: email, text: reza@example.ir }
  - type: { field: phone, text: "09350001122" }
  - gender: male
  - country: IR
  - city: اصفهان
  - start_date: 1403/01/01
  - end_date: 1403/01/10
  - submit
"#;

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_json_document_written_by_replay() {
    let dir = tempfile::tempdir().unwrap();
    let script: ReplayScript = serde_yaml::from_str(SESSION).unwrap();
    let report = replay(&script, Locale::Fa, |_: &FormValues| {}).unwrap();

    let path = write(
        &dir,
        "record.json",
        &serde_json::to_string(&report.values).unwrap(),
    );
    assert!(validate_document(&path, Locale::Fa).unwrap().is_empty());

    let args = ValidateArgs {
        path,
        format: OutputFormat::Text,
    };
    assert_eq!(run_validate(&args, Locale::Fa).unwrap(), 0);
}

#[test]
fn validate_reports_city_outside_country() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "mixed.json",
        r#"{
            "userName": "reza", "password": "hunter22", "repeatPassword": "hunter22",
            "email": "reza@example.ir", "phone": "09350001122", "gender": "male",
            "accept": true, "country": "US", "city": "اصفهان",
            "startDate": "2024-03-20", "endDate": "2024-03-29"
        }"#,
    );
    let errors = validate_document(&path, Locale::En).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.get(FieldName::City),
        Some("The selected city does not belong to this country")
    );
}

#[test]
fn validate_missing_file_is_operational_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = ValidateArgs {
        path: dir.path().join("nope.yaml"),
        format: OutputFormat::Json,
    };
    assert!(run_validate(&args, Locale::Fa).is_err());
}

// ---------------------------------------------------------------------------
// replay
// ---------------------------------------------------------------------------

#[test]
fn replay_clean_session_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let args = ReplayArgs {
        script: write(&dir, "session.yaml", SESSION),
    };
    assert_eq!(run_replay(&args, Locale::Fa).unwrap(), 0);
}

#[test]
fn replay_records_converted_dates() {
    let script: ReplayScript = serde_yaml::from_str(SESSION).unwrap();
    let report = replay(&script, Locale::Fa, |_: &FormValues| {}).unwrap();
    assert_eq!(report.submits, vec![SubmitOutcome::Delivered]);
    assert_eq!(report.values.start_date, "2024-03-20");
    assert_eq!(report.values.end_date, "2024-03-29");
    assert_eq!(report.values.city, "اصفهان");
    assert!(report.is_clean());
}

#[test]
fn replay_blocked_submit_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let script = SESSION.replace("  - submit", "  - accept: false\n  - submit");
    let args = ReplayArgs {
        script: write(&dir, "declined.yaml", &script),
    };
    assert_eq!(run_replay(&args, Locale::Fa).unwrap(), 1);
}

#[test]
fn replay_json_script() {
    let dir = tempfile::tempdir().unwrap();
    let args = ReplayArgs {
        script: write(
            &dir,
            "session.json",
            r#"{"events": [{"country": "DE"}, {"city": "مونیخ"}]}"#,
        ),
    };
    assert_eq!(run_replay(&args, Locale::En).unwrap(), 0);
}

#[test]
fn replay_malformed_script_is_operational_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = ReplayArgs {
        script: write(&dir, "bad.yaml", "events:\n  - teleport: somewhere\n"),
    };
    assert!(run_replay(&args, Locale::Fa).is_err());
}

// ---------------------------------------------------------------------------
// convert-date / cities
// ---------------------------------------------------------------------------

#[test]
fn convert_date_exit_codes() {
    let ok = ConvertArgs {
        date: Some("1399/12/30".to_string()),
        today: false,
    };
    assert_eq!(run_convert(&ok).unwrap(), 0);

    let not_leap = ConvertArgs {
        date: Some("1400/12/30".to_string()),
        today: false,
    };
    assert!(run_convert(&not_leap).is_err());
}

#[test]
fn cities_exit_codes() {
    assert_eq!(run_cities(&CitiesArgs { code: None }).unwrap(), 0);
    assert_eq!(
        run_cities(&CitiesArgs {
            code: Some("US".to_string())
        })
        .unwrap(),
        0
    );
}
