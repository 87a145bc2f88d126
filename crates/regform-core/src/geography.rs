//! # Country/City Table
//!
//! Static mapping from country code to an ordered list of city names. The
//! table is compiled in; extending it is a code change, not a data load.
//!
//! City names are stored in Persian, as they are shown to the user.

use serde::Serialize;

/// One selectable country and the cities offered for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryEntry {
    /// ISO 3166-1 alpha-2 code submitted by the select.
    pub code: &'static str,
    /// Label shown in the country select.
    pub label: &'static str,
    /// Cities in display order.
    pub cities: &'static [&'static str],
}

const BUILTIN: &[CountryEntry] = &[
    CountryEntry {
        code: "IR",
        label: "ایران",
        cities: &["تهران", "مشهد", "اصفهان", "تبریز"],
    },
    CountryEntry {
        code: "US",
        label: "آمریکا",
        cities: &["نیویورک", "لس آنجلس", "شیکاگو"],
    },
    CountryEntry {
        code: "DE",
        label: "آلمان",
        cities: &["برلین", "مونیخ", "فرانکفورت"],
    },
];

/// Immutable view over a `'static` country table.
///
/// `Copy` so that every state machine can hold its own handle without
/// sharing mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryCityTable {
    entries: &'static [CountryEntry],
}

impl CountryCityTable {
    /// The table shipped with the form.
    pub fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    /// Build a table over caller-supplied static entries.
    pub const fn from_static(entries: &'static [CountryEntry]) -> Self {
        Self { entries }
    }

    /// All countries in display order.
    pub fn countries(&self) -> &'static [CountryEntry] {
        self.entries
    }

    /// Look up a country entry by code.
    pub fn entry(&self, code: &str) -> Option<&'static CountryEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// Cities for a country code. Unknown codes yield an empty slice.
    pub fn cities(&self, code: &str) -> &'static [&'static str] {
        self.entry(code).map(|e| e.cities).unwrap_or(&[])
    }

    /// Display label for a country code.
    pub fn label(&self, code: &str) -> Option<&'static str> {
        self.entry(code).map(|e| e.label)
    }

    /// Whether `city` is offered for `code`.
    pub fn contains_city(&self, code: &str, city: &str) -> bool {
        self.cities(code).contains(&city)
    }
}

impl Default for CountryCityTable {
    fn default() -> Self {
        Self::builtin()
    }
}
