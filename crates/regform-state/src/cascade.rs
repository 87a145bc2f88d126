//! # Cascading Country → City Selection
//!
//! The city select offers the cities of whatever country is selected. When
//! the country changes to a non-empty code the list is recomputed from the
//! static table and the chosen city is reset, since it belonged to the
//! previous country.
//!
//! ```text
//!   country changes to X (X ≠ "")  ──▶ cities = table[X] (or []), city = ""
//!   country changes to ""          ──▶ EmptyCountryPolicy decides
//!   country "changes" to itself    ──▶ nothing
//! ```

use serde::{Deserialize, Serialize};

use regform_core::{CountryCityTable, FormValues};

use crate::error::StateError;

/// What clearing the country does to the city list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCountryPolicy {
    /// Clear the list and the chosen city.
    #[default]
    Reset,
    /// Keep the previous country's list and city untouched.
    PreserveStale,
}

/// Derived city list for the selected country.
#[derive(Debug, Clone)]
pub struct CitySelector {
    table: CountryCityTable,
    policy: EmptyCountryPolicy,
    selected: String,
    cities: &'static [&'static str],
}

impl CitySelector {
    pub fn new(table: CountryCityTable, policy: EmptyCountryPolicy) -> Self {
        Self {
            table,
            policy,
            selected: String::new(),
            cities: &[],
        }
    }

    /// Country the list was last derived from.
    pub fn selected_country(&self) -> &str {
        &self.selected
    }

    /// Cities currently offered.
    pub fn cities(&self) -> &'static [&'static str] {
        self.cities
    }

    pub fn policy(&self) -> EmptyCountryPolicy {
        self.policy
    }

    pub fn table(&self) -> CountryCityTable {
        self.table
    }

    /// Store `code` as the country and react to the change.
    ///
    /// Returns whether the city list or city value was touched.
    pub fn on_country_change(&mut self, values: &mut FormValues, code: &str) -> bool {
        values.country = code.to_string();
        if self.selected == code {
            return false;
        }
        self.selected = code.to_string();

        if code.is_empty() {
            return match self.policy {
                EmptyCountryPolicy::Reset => {
                    self.cities = &[];
                    values.city.clear();
                    tracing::debug!("country cleared; city list reset");
                    true
                }
                EmptyCountryPolicy::PreserveStale => {
                    tracing::debug!("country cleared; keeping stale city list");
                    false
                }
            };
        }

        self.cities = self.table.cities(code);
        values.city.clear();
        tracing::debug!(country = code, city_count = self.cities.len(), "city list recomputed");
        true
    }

    /// Choose a city from the current list. The empty placeholder is always
    /// allowed.
    pub fn select_city(&self, values: &mut FormValues, city: &str) -> Result<(), StateError> {
        if !city.is_empty() && !self.cities.contains(&city) {
            return Err(StateError::CityNotOffered {
                country: self.selected.clone(),
                city: city.to_string(),
            });
        }
        values.city = city.to_string();
        Ok(())
    }
}

impl Default for CitySelector {
    fn default() -> Self {
        Self::new(CountryCityTable::builtin(), EmptyCountryPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_country_yields_its_table_entry() {
        let table = CountryCityTable::builtin();
        for entry in table.countries() {
            let mut selector = CitySelector::default();
            let mut values = FormValues {
                city: "stale".to_string(),
                ..FormValues::default()
            };
            assert!(selector.on_country_change(&mut values, entry.code));
            assert_eq!(selector.cities(), entry.cities);
            assert_eq!(values.country, entry.code);
            assert!(values.city.is_empty());
        }
    }

    #[test]
    fn unknown_country_yields_empty_list() {
        let mut selector = CitySelector::default();
        let mut values = FormValues::default();
        selector.on_country_change(&mut values, "IR");
        selector.select_city(&mut values, "تهران").unwrap();
        selector.on_country_change(&mut values, "FR");
        assert!(selector.cities().is_empty());
        assert!(values.city.is_empty());
    }

    #[test]
    fn switching_country_resets_city() {
        let mut selector = CitySelector::default();
        let mut values = FormValues::default();
        selector.on_country_change(&mut values, "IR");
        selector.select_city(&mut values, "اصفهان").unwrap();
        selector.on_country_change(&mut values, "US");
        assert!(values.city.is_empty());
        assert_eq!(selector.cities(), ["نیویورک", "لس آنجلس", "شیکاگو"]);
    }

    #[test]
    fn same_country_is_a_no_op() {
        let mut selector = CitySelector::default();
        let mut values = FormValues::default();
        selector.on_country_change(&mut values, "DE");
        selector.select_city(&mut values, "مونیخ").unwrap();
        assert!(!selector.on_country_change(&mut values, "DE"));
        assert_eq!(values.city, "مونیخ");
    }

    #[test]
    fn empty_country_reset_policy() {
        let mut selector =
            CitySelector::new(CountryCityTable::builtin(), EmptyCountryPolicy::Reset);
        let mut values = FormValues::default();
        selector.on_country_change(&mut values, "IR");
        selector.select_city(&mut values, "تبریز").unwrap();
        assert!(selector.on_country_change(&mut values, ""));
        assert!(selector.cities().is_empty());
        assert!(values.city.is_empty());
        assert!(values.country.is_empty());
    }

    #[test]
    fn empty_country_preserve_policy() {
        let mut selector =
            CitySelector::new(CountryCityTable::builtin(), EmptyCountryPolicy::PreserveStale);
        let mut values = FormValues::default();
        selector.on_country_change(&mut values, "IR");
        selector.select_city(&mut values, "تبریز").unwrap();
        assert!(!selector.on_country_change(&mut values, ""));
        assert_eq!(selector.cities().len(), 4);
        assert_eq!(values.city, "تبریز");
        assert!(values.country.is_empty());
    }

    #[test]
    fn city_must_be_offered() {
        let mut selector = CitySelector::default();
        let mut values = FormValues::default();
        selector.on_country_change(&mut values, "IR");
        let err = selector.select_city(&mut values, "برلین").unwrap_err();
        assert_eq!(
            err,
            StateError::CityNotOffered {
                country: "IR".to_string(),
                city: "برلین".to_string(),
            }
        );
        assert!(values.city.is_empty());
        selector.select_city(&mut values, "").unwrap();
    }
}
