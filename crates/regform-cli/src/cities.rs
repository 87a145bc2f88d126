//! # Cities Subcommand
//!
//! Prints the compiled-in country/city table the cascading select uses.

use anyhow::Result;
use clap::Args;

use regform_core::CountryCityTable;

/// Arguments for the `regform cities` subcommand.
#[derive(Args, Debug)]
pub struct CitiesArgs {
    /// Country code whose cities to list; omit to list countries.
    #[arg(value_name = "CODE")]
    pub code: Option<String>,
}

/// Execute the cities subcommand.
///
/// Returns exit code 1 for a country code the table does not know.
pub fn run_cities(args: &CitiesArgs) -> Result<u8> {
    let table = CountryCityTable::builtin();
    match listing(table, args.code.as_deref()) {
        Some(lines) => {
            for line in lines {
                println!("{line}");
            }
            Ok(0)
        }
        None => {
            tracing::warn!(code = ?args.code, "unknown country code");
            println!("Unknown country code; known codes:");
            for entry in table.countries() {
                println!("  {}", entry.code);
            }
            Ok(1)
        }
    }
}

/// Lines to print, or `None` for an unknown country.
fn listing(table: CountryCityTable, code: Option<&str>) -> Option<Vec<String>> {
    match code {
        None => Some(
            table
                .countries()
                .iter()
                .map(|e| format!("{}\t{}\t{} cities", e.code, e.label, e.cities.len()))
                .collect(),
        ),
        Some(code) => table
            .entry(code)
            .map(|e| e.cities.iter().map(|c| c.to_string()).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_countries_in_table_order() {
        let lines = listing(CountryCityTable::builtin(), None).unwrap();
        assert_eq!(
            lines,
            vec!["IR\tایران\t4 cities", "US\tآمریکا\t3 cities", "DE\tآلمان\t3 cities"]
        );
    }

    #[test]
    fn lists_cities_of_one_country() {
        let lines = listing(CountryCityTable::builtin(), Some("DE")).unwrap();
        assert_eq!(lines, vec!["برلین", "مونیخ", "فرانکفورت"]);
    }

    #[test]
    fn unknown_country() {
        assert!(listing(CountryCityTable::builtin(), Some("FR")).is_none());
        let args = CitiesArgs {
            code: Some("FR".to_string()),
        };
        assert_eq!(run_cities(&args).unwrap(), 1);
    }
}
