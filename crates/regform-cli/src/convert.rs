//! # Convert-Date Subcommand
//!
//! Turns a Jalaali picker date into the Gregorian string the form stores.

use anyhow::{Context, Result};
use clap::Args;

use regform_core::{convert_date, JalaaliDate};

/// Arguments for the `regform convert-date` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Jalaali date as `YYYY/MM/DD`; Persian and Arabic-Indic digits accepted.
    #[arg(value_name = "DATE", required_unless_present = "today", conflicts_with = "today")]
    pub date: Option<String>,

    /// Convert today's date in the local timezone.
    #[arg(long)]
    pub today: bool,
}

/// Execute the convert-date subcommand.
pub fn run_convert(args: &ConvertArgs) -> Result<u8> {
    let date = resolve_date(args)?;
    println!("{}", render(&date));
    Ok(0)
}

fn resolve_date(args: &ConvertArgs) -> Result<JalaaliDate> {
    match (&args.date, args.today) {
        (_, true) => JalaaliDate::today()
            .context("today's date is outside the supported calendar range"),
        (Some(raw), false) => raw
            .parse::<JalaaliDate>()
            .with_context(|| format!("invalid Jalaali date {raw:?}")),
        (None, false) => anyhow::bail!("either DATE or --today is required"),
    }
}

fn render(date: &JalaaliDate) -> String {
    format!("{date} -> {}", convert_date(date))
}
