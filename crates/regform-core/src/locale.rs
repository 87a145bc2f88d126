//! # Localized Messages
//!
//! User-facing validation messages. Persian is the form's native language
//! and the default; English is provided for tooling and logs.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language of the validation messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Persian.
    #[default]
    Fa,
    /// English.
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fa => "fa",
            Self::En => "en",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fa" => Ok(Self::Fa),
            "en" => Ok(Self::En),
            other => Err(format!("unknown locale {other:?} (expected fa or en)")),
        }
    }
}

/// One message per registration rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub user_name_min: &'static str,
    pub password_min: &'static str,
    pub repeat_password_min: &'static str,
    pub email_invalid: &'static str,
    pub phone_invalid: &'static str,
    pub gender_invalid: &'static str,
    pub accept_required: &'static str,
    pub country_required: &'static str,
    pub city_required: &'static str,
    pub start_date_required: &'static str,
    pub end_date_required: &'static str,
    /// Cross-field: password confirmation does not match.
    pub password_mismatch: &'static str,
    /// Cross-field: city not offered for the selected country.
    pub city_not_in_country: &'static str,
}

const FA: Messages = Messages {
    user_name_min: "حداقل ۳ حرف وارد کنید",
    password_min: "رمز عبور حداقل باید ۶ کاراکتر باشد",
    repeat_password_min: "تکرار رمز عبور الزامی است",
    email_invalid: "ایمیل معتبر نیست",
    phone_invalid: "شماره موبایل باید با 09 شروع شده و 11 رقم باشد",
    gender_invalid: "لطفاً جنسیت معتبر را انتخاب کنید",
    accept_required: "باید قوانین را بپذیرید",
    country_required: "کشور را انتخاب کنید",
    city_required: "شهر را انتخاب کنید",
    start_date_required: "تاریخ شروع الزامی است",
    end_date_required: "تاریخ پایان الزامی است",
    password_mismatch: "رمز عبور و تکرار آن باید یکسان باشند",
    city_not_in_country: "شهر انتخاب‌شده متعلق به این کشور نیست",
};

const EN: Messages = Messages {
    user_name_min: "Enter at least 3 characters",
    password_min: "Password must be at least 6 characters",
    repeat_password_min: "Password confirmation is required",
    email_invalid: "Email is not valid",
    phone_invalid: "Mobile number must start with 09 and be 11 digits",
    gender_invalid: "Please choose a valid gender",
    accept_required: "You must accept the terms",
    country_required: "Choose a country",
    city_required: "Choose a city",
    start_date_required: "Start date is required",
    end_date_required: "End date is required",
    password_mismatch: "Password and confirmation must match",
    city_not_in_country: "The selected city does not belong to this country",
};

impl Messages {
    /// Message catalogue for `locale`.
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Fa => &FA,
            Locale::En => &EN,
        }
    }
}
