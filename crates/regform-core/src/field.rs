//! # Field Names — Single Source of Truth
//!
//! Defines the `FieldName` enum with all eleven registration form fields.
//! Validation errors, touched-field tracking and schema rules are all keyed
//! by this enum. Every `match` on it must be exhaustive, so adding a field
//! forces every consumer to handle it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RegformError;

/// Every field on the registration form.
///
/// The serde representation is the camelCase wire name used in documents
/// and error maps (`userName`, `repeatPassword`, `startDate`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    /// Login name, at least three characters.
    UserName,
    /// Password, at least six characters.
    Password,
    /// Password confirmation; must equal `Password`.
    RepeatPassword,
    /// Contact email address.
    Email,
    /// Mobile number: `09` followed by nine digits.
    Phone,
    /// Radio group: `male` or `female`.
    Gender,
    /// Terms-of-service checkbox.
    Accept,
    /// Country code from the static table.
    Country,
    /// City belonging to the selected country.
    City,
    /// Start of the date range, Gregorian `YYYY-MM-DD`.
    StartDate,
    /// End of the date range, Gregorian `YYYY-MM-DD`.
    EndDate,
}

impl FieldName {
    /// Returns all fields in form order.
    pub fn all() -> &'static [FieldName] {
        &[
            Self::UserName,
            Self::Password,
            Self::RepeatPassword,
            Self::Email,
            Self::Phone,
            Self::Gender,
            Self::Accept,
            Self::Country,
            Self::City,
            Self::StartDate,
            Self::EndDate,
        ]
    }

    /// Returns the camelCase wire name for this field.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserName => "userName",
            Self::Password => "password",
            Self::RepeatPassword => "repeatPassword",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Gender => "gender",
            Self::Accept => "accept",
            Self::Country => "country",
            Self::City => "city",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
        }
    }

    /// Whether the field holds free text the user types into.
    pub fn is_typed_text(&self) -> bool {
        matches!(
            self,
            Self::UserName | Self::Password | Self::RepeatPassword | Self::Email | Self::Phone
        )
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = RegformError;

    /// Parse a field from its camelCase wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| RegformError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_count() {
        assert_eq!(FieldName::all().len(), 11);
    }

    #[test]
    fn as_str_matches_serde() {
        for field in FieldName::all() {
            let json = serde_json::to_string(field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn from_str_roundtrip() {
        for field in FieldName::all() {
            let parsed: FieldName = field.as_str().parse().unwrap();
            assert_eq!(&parsed, field);
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "bio".parse::<FieldName>().unwrap_err();
        assert_eq!(err, RegformError::UnknownField("bio".to_string()));
        assert!("UserName".parse::<FieldName>().is_err());
    }

    #[test]
    fn typed_text_fields() {
        assert!(FieldName::Phone.is_typed_text());
        assert!(FieldName::RepeatPassword.is_typed_text());
        assert!(!FieldName::Country.is_typed_text());
        assert!(!FieldName::StartDate.is_typed_text());
        assert!(!FieldName::Accept.is_typed_text());
    }
}
