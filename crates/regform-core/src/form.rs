//! # Form Values
//!
//! The single record behind the registration form. Every keystroke and
//! selection mutates one of its fields; validation reads the whole record.
//!
//! String fields hold exactly what the user entered, including the empty
//! string for "nothing chosen yet". That is why `gender` is a `String` here
//! and only becomes a [`Gender`] once validated: an untouched radio group
//! has no typed value.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RegformError;
use crate::field::FieldName;

/// Radio group options for the gender field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// `"male"`.
    Male,
    /// `"female"`.
    Female,
}

impl Gender {
    /// Returns the wire value submitted by the radio input.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = RegformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(RegformError::UnknownGender(other.to_string())),
        }
    }
}

/// The complete state of one registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub user_name: String,
    pub password: String,
    pub repeat_password: String,
    pub email: String,
    pub phone: String,
    /// `"male"`, `"female"`, or empty while unselected.
    pub gender: String,
    pub accept: bool,
    /// Country code (`IR`, `US`, `DE`) or empty.
    pub country: String,
    pub city: String,
    /// Gregorian `YYYY-MM-DD`, or empty.
    pub start_date: String,
    /// Gregorian `YYYY-MM-DD`, or empty.
    pub end_date: String,
}

impl Default for FormValues {
    /// The mount state of the form: every text empty, terms pre-accepted.
    fn default() -> Self {
        Self {
            user_name: String::new(),
            password: String::new(),
            repeat_password: String::new(),
            email: String::new(),
            phone: String::new(),
            gender: String::new(),
            accept: true,
            country: String::new(),
            city: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

impl FormValues {
    /// Borrow a string-valued field. Returns `None` for `accept`.
    pub fn text(&self, field: FieldName) -> Option<&str> {
        let value = match field {
            FieldName::UserName => &self.user_name,
            FieldName::Password => &self.password,
            FieldName::RepeatPassword => &self.repeat_password,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
            FieldName::Gender => &self.gender,
            FieldName::Country => &self.country,
            FieldName::City => &self.city,
            FieldName::StartDate => &self.start_date,
            FieldName::EndDate => &self.end_date,
            FieldName::Accept => return None,
        };
        Some(value.as_str())
    }

    /// Overwrite a string-valued field.
    ///
    /// # Errors
    ///
    /// Returns [`RegformError::NotTextField`] for `accept`.
    pub fn set_text(
        &mut self,
        field: FieldName,
        value: impl Into<String>,
    ) -> Result<(), RegformError> {
        let slot = match field {
            FieldName::UserName => &mut self.user_name,
            FieldName::Password => &mut self.password,
            FieldName::RepeatPassword => &mut self.repeat_password,
            FieldName::Email => &mut self.email,
            FieldName::Phone => &mut self.phone,
            FieldName::Gender => &mut self.gender,
            FieldName::Country => &mut self.country,
            FieldName::City => &mut self.city,
            FieldName::StartDate => &mut self.start_date,
            FieldName::EndDate => &mut self.end_date,
            FieldName::Accept => return Err(RegformError::NotTextField(field.to_string())),
        };
        *slot = value.into();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_mount_state() {
        let v = FormValues::default();
        assert!(v.accept);
        for field in FieldName::all() {
            if let Some(text) = v.text(*field) {
                assert!(text.is_empty(), "{field} should start empty");
            }
        }
    }

    #[test]
    fn text_accessors_cover_every_string_field() {
        let mut v = FormValues::default();
        for field in FieldName::all() {
            if *field == FieldName::Accept {
                assert!(v.text(*field).is_none());
                assert!(v.set_text(*field, "x").is_err());
                continue;
            }
            v.set_text(*field, field.as_str()).unwrap();
            assert_eq!(v.text(*field), Some(field.as_str()));
        }
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let v = FormValues {
            user_name: "ali".to_string(),
            repeat_password: "secret".to_string(),
            start_date: "2024-03-20".to_string(),
            ..FormValues::default()
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["userName"], "ali");
        assert_eq!(json["repeatPassword"], "secret");
        assert_eq!(json["startDate"], "2024-03-20");
        assert_eq!(json["accept"], true);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let v: FormValues = serde_json::from_str(r#"{"userName":"sara"}"#).unwrap();
        assert_eq!(v.user_name, "sara");
        assert!(v.accept);
        assert!(v.email.is_empty());
    }

    #[test]
    fn gender_parse_and_display() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("Male".parse::<Gender>().is_err());
        assert!("".parse::<Gender>().is_err());
        assert_eq!(Gender::Female.to_string(), "female");
    }
}
