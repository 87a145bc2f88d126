//! # regform CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use regform_cli::cities::{run_cities, CitiesArgs};
use regform_cli::convert::{run_convert, ConvertArgs};
use regform_cli::replay::{run_replay, ReplayArgs};
use regform_cli::validate::{run_validate, ValidateArgs};
use regform_core::Locale;

/// Registration form toolkit.
///
/// Validates form documents against the registration schema, converts
/// Jalaali picker dates, lists the country/city table, and replays scripted
/// UI sessions against the form state machines.
#[derive(Parser, Debug)]
#[command(name = "regform", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Language of validation messages (fa or en).
    #[arg(long, global = true, default_value = "fa")]
    locale: Locale,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a form document (JSON or YAML) against the registration schema.
    Validate(ValidateArgs),

    /// Convert a Jalaali date (YYYY/MM/DD) to the stored Gregorian form.
    ConvertDate(ConvertArgs),

    /// List countries, or the cities offered for one country.
    Cities(CitiesArgs),

    /// Replay a scripted sequence of UI events against the form.
    Replay(ReplayArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(locale = %cli.locale, "regform CLI starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, cli.locale),
        Commands::ConvertDate(args) => run_convert(&args),
        Commands::Cities(args) => run_cities(&args),
        Commands::Replay(args) => run_replay(&args, cli.locale),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
