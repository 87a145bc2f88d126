//! # Rules
//!
//! Field rules check one value in isolation. Cross-field rules read the
//! whole record and report against a single target field.

use regex::Regex;

use regform_core::{CountryCityTable, FieldName, FormValues};

use crate::validate::SchemaError;

/// Mobile number: `09` followed by exactly nine ASCII digits.
pub const PHONE_PATTERN: &str = r"^09[0-9]{9}$";

/// Email address grammar.
///
/// Local part of letters, digits and `_ ' + - .`, ending in a letter,
/// digit, `_`, `+` or `-`; one or more domain labels that start with an
/// alphanumeric; a top-level domain of at least two letters. Two further
/// conditions (no leading dot, no `..`) are checked outside the regex.
///
/// Letters are spelled out as ASCII ranges; `(?i)` would fold `ſ` and the
/// Kelvin sign onto `s` and `k`.
pub const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";

/// The value of one field, as a rule sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Any string-valued field.
    Text(&'a str),
    /// The `accept` checkbox.
    Flag(bool),
}

impl<'a> FieldValue<'a> {
    /// Read `field` out of `values`.
    pub fn of(values: &'a FormValues, field: FieldName) -> Self {
        match values.text(field) {
            Some(text) => Self::Text(text),
            None => Self::Flag(values.accept),
        }
    }
}

/// A check over a single field's value.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Text of at least `min` characters (Unicode scalar values).
    MinLength { min: usize, message: String },
    /// Text matching a regular expression.
    Pattern { regex: Regex, message: String },
    /// Text that is a syntactically valid email address.
    Email { regex: Regex, message: String },
    /// Text equal to one of the allowed literals.
    OneOf { allowed: Vec<String>, message: String },
    /// A flag that must be set.
    MustBeTrue { message: String },
}

impl FieldRule {
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    /// Non-empty text. Shorthand for `min_length(1, ..)`.
    pub fn required(message: impl Into<String>) -> Self {
        Self::min_length(1, message)
    }

    /// Compile `pattern` into a rule.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if the regex does not compile.
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, SchemaError> {
        Ok(Self::Pattern {
            regex: compile(pattern)?,
            message: message.into(),
        })
    }

    pub fn email(message: impl Into<String>) -> Result<Self, SchemaError> {
        Ok(Self::Email {
            regex: compile(EMAIL_PATTERN)?,
            message: message.into(),
        })
    }

    pub fn one_of<I, S>(allowed: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn must_be_true(message: impl Into<String>) -> Self {
        Self::MustBeTrue {
            message: message.into(),
        }
    }

    /// Short rule name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MinLength { .. } => "min_length",
            Self::Pattern { .. } => "pattern",
            Self::Email { .. } => "email",
            Self::OneOf { .. } => "one_of",
            Self::MustBeTrue { .. } => "must_be_true",
        }
    }

    /// Whether this rule reads a boolean rather than text.
    pub fn expects_flag(&self) -> bool {
        matches!(self, Self::MustBeTrue { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::MinLength { message, .. }
            | Self::Pattern { message, .. }
            | Self::Email { message, .. }
            | Self::OneOf { message, .. }
            | Self::MustBeTrue { message } => message,
        }
    }

    /// Whether `value` satisfies the rule. A rule applied to the wrong kind
    /// of value fails.
    pub fn check(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Self::MinLength { min, .. }, FieldValue::Text(text)) => text.chars().count() >= *min,
            (Self::Pattern { regex, .. }, FieldValue::Text(text)) => regex.is_match(text),
            (Self::Email { regex, .. }, FieldValue::Text(text)) => {
                !text.starts_with('.') && !text.contains("..") && regex.is_match(text)
            }
            (Self::OneOf { allowed, .. }, FieldValue::Text(text)) => {
                allowed.iter().any(|a| a == text)
            }
            (Self::MustBeTrue { .. }, FieldValue::Flag(flag)) => flag,
            _ => false,
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, SchemaError> {
    Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// A check that reads more than one field.
#[derive(Debug, Clone)]
pub enum CrossFieldRule {
    /// `left` and `right` must hold the same text; failure goes to `target`.
    Equals {
        left: FieldName,
        right: FieldName,
        target: FieldName,
        message: String,
    },
    /// A non-empty city must be one the table offers for the selected
    /// country; failure goes to `city`.
    CityInCountry {
        table: CountryCityTable,
        message: String,
    },
}

impl CrossFieldRule {
    pub fn equals(
        left: FieldName,
        right: FieldName,
        target: FieldName,
        message: impl Into<String>,
    ) -> Self {
        Self::Equals {
            left,
            right,
            target,
            message: message.into(),
        }
    }

    pub fn city_in_country(table: CountryCityTable, message: impl Into<String>) -> Self {
        Self::CityInCountry {
            table,
            message: message.into(),
        }
    }

    /// The field whose error slot receives this rule's failure.
    pub fn target(&self) -> FieldName {
        match self {
            Self::Equals { target, .. } => *target,
            Self::CityInCountry { .. } => FieldName::City,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Equals { message, .. } | Self::CityInCountry { message, .. } => message,
        }
    }

    /// Whether the record satisfies the rule.
    pub fn check(&self, values: &FormValues) -> bool {
        match self {
            Self::Equals { left, right, .. } => {
                FieldValue::of(values, *left) == FieldValue::of(values, *right)
            }
            Self::CityInCountry { table, .. } => {
                values.city.is_empty() || table.contains_city(&values.country, &values.city)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue<'_> {
        FieldValue::Text(s)
    }

    #[test]
    fn min_length_counts_characters() {
        let rule = FieldRule::min_length(3, "short");
        assert!(!rule.check(text("ab")));
        assert!(rule.check(text("abc")));
        // Three Persian letters are six UTF-8 bytes but three characters.
        assert!(rule.check(text("علی")));
        assert!(!FieldRule::required("empty").check(text("")));
    }

    #[test]
    fn phone_pattern() {
        let rule = FieldRule::pattern(PHONE_PATTERN, "bad phone").unwrap();
        assert!(rule.check(text("09123456789")));
        assert!(!rule.check(text("0912345678")));
        assert!(!rule.check(text("091234567890")));
        assert!(!rule.check(text("19123456789")));
        assert!(!rule.check(text("0912345678a")));
        // Persian digits are not ASCII digits.
        assert!(!rule.check(text("09۱۲۳۴۵۶۷۸۹")));
    }

    #[test]
    fn email_accepts_common_addresses() {
        let rule = FieldRule::email("bad email").unwrap();
        for ok in [
            "user@example.com",
            "first.last@sub.example.org",
            "o'brien+tag@mail.co",
            "USER_1@EXAMPLE.IR",
        ] {
            assert!(rule.check(text(ok)), "{ok} should be accepted");
        }
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        let rule = FieldRule::email("bad email").unwrap();
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            ".user@example.com",
            "user..name@example.com",
            "user.@example.com",
            "user@-example.com",
            "user@example",
            "user@example.c",
            "user@@example.com",
            "user name@example.com",
        ] {
            assert!(!rule.check(text(bad)), "{bad} should be rejected");
        }
    }

    #[test]
    fn email_rejects_non_ascii_case_folds() {
        let rule = FieldRule::email("bad email").unwrap();
        assert!(!rule.check(text("\u{17F}@example.com")));
        assert!(!rule.check(text("a@example.\u{212A}\u{212A}")));
        assert!(rule.check(text("s@example.kk")));
    }

    #[test]
    fn one_of_is_exact() {
        let rule = FieldRule::one_of(["male", "female"], "pick one");
        assert!(rule.check(text("male")));
        assert!(rule.check(text("female")));
        assert!(!rule.check(text("Male")));
        assert!(!rule.check(text("")));
    }

    #[test]
    fn must_be_true() {
        let rule = FieldRule::must_be_true("accept");
        assert!(rule.check(FieldValue::Flag(true)));
        assert!(!rule.check(FieldValue::Flag(false)));
        assert!(rule.expects_flag());
    }

    #[test]
    fn kind_mismatch_fails() {
        assert!(!FieldRule::must_be_true("x").check(text("true")));
        assert!(!FieldRule::required("x").check(FieldValue::Flag(true)));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = FieldRule::pattern("(unclosed", "x").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }

    #[test]
    fn equals_compares_two_fields() {
        let rule = CrossFieldRule::equals(
            FieldName::Password,
            FieldName::RepeatPassword,
            FieldName::RepeatPassword,
            "mismatch",
        );
        let mut v = FormValues {
            password: "secret1".to_string(),
            repeat_password: "secret1".to_string(),
            ..FormValues::default()
        };
        assert!(rule.check(&v));
        v.repeat_password.push('x');
        assert!(!rule.check(&v));
        assert_eq!(rule.target(), FieldName::RepeatPassword);
    }

    #[test]
    fn city_in_country() {
        let rule = CrossFieldRule::city_in_country(CountryCityTable::builtin(), "wrong city");
        let mut v = FormValues::default();
        assert!(rule.check(&v), "empty city is left to the required rule");
        v.country = "IR".to_string();
        v.city = "تبریز".to_string();
        assert!(rule.check(&v));
        v.country = "DE".to_string();
        assert!(!rule.check(&v));
        v.country.clear();
        assert!(!rule.check(&v));
        assert_eq!(rule.target(), FieldName::City);
    }
}
