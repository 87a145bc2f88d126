//! # Jalaali Calendar — Local Date to Gregorian String
//!
//! The date pickers on the form operate in the Jalaali (Persian solar
//! hijri) calendar. The form stores Gregorian `YYYY-MM-DD` strings. This
//! module owns that conversion.
//!
//! ## Backing
//!
//! Calendar arithmetic is delegated to `icu_calendar`'s Persian calendar:
//! dates are built from fields on an [`AnyCalendar`] and read back through
//! their ISO projection, which maps one-to-one onto [`chrono::NaiveDate`].
//!
//! ## Range
//!
//! Supported years are `1178..=1501`. Inside that span ICU's 33-year
//! arithmetic agrees day for day with the published Jalaali tables; past
//! 1501 ICU applies astronomical leap corrections that the tables do not.
//! [`JalaaliDate::new`] rejects anything else, so conversion of a
//! constructed date never fails.

use chrono::{Datelike, NaiveDate};
use icu_calendar::types::DateFields;
use icu_calendar::{AnyCalendar, AnyCalendarKind, Date};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CalendarError;

/// Smallest supported Jalaali year.
pub const MIN_YEAR: i32 = 1178;

/// Largest supported Jalaali year.
pub const MAX_YEAR: i32 = 1501;

fn persian() -> AnyCalendar {
    AnyCalendar::new(AnyCalendarKind::Persian)
}

fn unrepresentable(year: i32, month: u32, day: u32) -> CalendarError {
    CalendarError::Unrepresentable(format!("{year:04}/{month:02}/{day:02}"))
}

/// Build the ICU date for a Jalaali day, checking that ICU kept every
/// field as given.
fn persian_date(year: i32, month: u32, day: u32) -> Result<Date<AnyCalendar>, CalendarError> {
    let (Ok(ordinal_month), Ok(day_of_month)) = (u8::try_from(month), u8::try_from(day)) else {
        return Err(unrepresentable(year, month, day));
    };

    let mut fields = DateFields::default();
    fields.extended_year = Some(year);
    fields.ordinal_month = Some(ordinal_month);
    fields.day = Some(day_of_month);

    let date = Date::try_from_fields(fields, Default::default(), persian())
        .map_err(|_| unrepresentable(year, month, day))?;
    if date.year().extended_year() != year
        || date.month().ordinal != ordinal_month
        || date.day_of_month().0 != day_of_month
    {
        return Err(unrepresentable(year, month, day));
    }
    Ok(date)
}

fn check_year(year: i32) -> Result<(), CalendarError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::YearOutOfRange {
            year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        })
    }
}

/// Whether `year` is a Jalaali leap year (Esfand has 30 days).
///
/// # Errors
///
/// Returns [`CalendarError::YearOutOfRange`] outside `MIN_YEAR..=MAX_YEAR`.
pub fn is_leap_year(year: i32) -> Result<bool, CalendarError> {
    check_year(year)?;
    Ok(persian_date(year, 1, 1)?.is_in_leap_year())
}

/// Number of days in a Jalaali month.
///
/// Months 1–6 have 31 days, 7–11 have 30, and Esfand (12) has 30 in leap
/// years and 29 otherwise.
pub fn month_length(year: i32, month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::MonthOutOfRange(month));
    }
    check_year(year)?;
    Ok(u32::from(persian_date(year, month, 1)?.days_in_month()))
}

/// A validated day on the Jalaali calendar.
///
/// Ordering follows the calendar: earlier days compare less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JalaaliDate {
    year: i32,
    month: u32,
    day: u32,
    gregorian: NaiveDate,
}

impl JalaaliDate {
    /// Construct a date, rejecting days that do not exist.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::YearOutOfRange`] for years outside `MIN_YEAR..=MAX_YEAR`.
    /// - [`CalendarError::MonthOutOfRange`] for months outside 1..=12.
    /// - [`CalendarError::DayOutOfRange`] for day 0 or past the month end.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        check_year(year)?;
        let length = month_length(year, month)?;
        if day == 0 || day > length {
            return Err(CalendarError::DayOutOfRange {
                year,
                month,
                day,
                length,
            });
        }

        let iso = persian_date(year, month, day)?.to_iso();
        let gregorian = NaiveDate::from_ymd_opt(
            iso.year().extended_year(),
            u32::from(iso.month().ordinal),
            u32::from(iso.day_of_month().0),
        )
        .ok_or_else(|| unrepresentable(year, month, day))?;

        Ok(Self {
            year,
            month,
            day,
            gregorian,
        })
    }

    /// Convert a Gregorian date into the Jalaali calendar.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] when the result would fall
    /// outside the supported range.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, CalendarError> {
        // Nowruz falls in March, so this is the Jalaali year of any day
        // from Nowruz to the end of December.
        let approx = date.year() - 621;
        let out_of_range = || CalendarError::YearOutOfRange {
            year: approx,
            min: MIN_YEAR,
            max: MAX_YEAR,
        };

        let (Ok(month), Ok(day)) = (u8::try_from(date.month()), u8::try_from(date.day())) else {
            return Err(out_of_range());
        };
        let iso = Date::try_new_iso(date.year(), month, day).map_err(|_| out_of_range())?;
        let jalaali = iso.to_any().to_calendar(persian());

        let year = jalaali.year().extended_year();
        check_year(year)?;
        Self::new(
            year,
            u32::from(jalaali.month().ordinal),
            u32::from(jalaali.day_of_month().0),
        )
    }

    /// Today's date on the Jalaali calendar, in the local timezone.
    pub fn today() -> Result<Self, CalendarError> {
        Self::from_gregorian(chrono::Local::now().date_naive())
    }

    /// Jalaali year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Jalaali month, 1..=12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day of month, starting at 1.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// The same day on the proleptic Gregorian calendar.
    pub fn to_gregorian(&self) -> NaiveDate {
        self.gregorian
    }
}

/// Convert a Jalaali date to the form's storage format, `YYYY-MM-DD`.
///
/// Total for every constructed [`JalaaliDate`].
pub fn convert_date(date: &JalaaliDate) -> String {
    date.to_gregorian().format("%Y-%m-%d").to_string()
}

impl std::fmt::Display for JalaaliDate {
    /// Renders the picker's display format, `YYYY/MM/DD`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Map Persian and Arabic-Indic digits to ASCII; leave everything else.
fn normalize_digit(c: char) -> char {
    match c {
        '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
        '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
        other => other,
    }
}

impl FromStr for JalaaliDate {
    type Err = CalendarError;

    /// Parse `YYYY/MM/DD` as produced by the date picker.
    ///
    /// ASCII, Persian (`۱۴۰۳/۰۱/۰۱`) and Arabic-Indic digits are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.trim().chars().map(normalize_digit).collect();
        let malformed = |reason: &str| CalendarError::Malformed {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = normalized.split('/').collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(malformed("expected YYYY/MM/DD"));
        };

        let year: i32 = year.parse().map_err(|_| malformed("year is not a number"))?;
        let month: u32 = month.parse().map_err(|_| malformed("month is not a number"))?;
        let day: u32 = day.parse().map_err(|_| malformed("day is not a number"))?;
        Self::new(year, month, day)
    }
}

impl TryFrom<String> for JalaaliDate {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JalaaliDate> for String {
    fn from(date: JalaaliDate) -> Self {
        date.to_string()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy over every valid Jalaali date in the supported range.
    fn valid_date() -> impl Strategy<Value = JalaaliDate> {
        (MIN_YEAR..=MAX_YEAR, 1u32..=12).prop_flat_map(|(y, m)| {
            let length = month_length(y, m).unwrap();
            (1..=length).prop_map(move |d| JalaaliDate::new(y, m, d).unwrap())
        })
    }

    proptest! {
        /// Output always parses back as a real Gregorian calendar day.
        #[test]
        fn converted_string_is_a_valid_gregorian_date(date in valid_date()) {
            let s = convert_date(&date);
            let parsed = NaiveDate::parse_from_str(&s, "%Y-%m-%d");
            prop_assert!(parsed.is_ok(), "{s} did not parse");
            prop_assert_eq!(parsed.unwrap(), date.to_gregorian());
        }

        /// Same input, same output.
        #[test]
        fn conversion_is_deterministic(y in MIN_YEAR..=MAX_YEAR, m in 1u32..=12, d in 1u32..=29) {
            let a = JalaaliDate::new(y, m, d).unwrap();
            let b = JalaaliDate::new(y, m, d).unwrap();
            prop_assert_eq!(convert_date(&a), convert_date(&b));
        }

        /// Gregorian → Jalaali inverts Jalaali → Gregorian.
        #[test]
        fn inverse_conversion_recovers_date(date in valid_date()) {
            let back = JalaaliDate::from_gregorian(date.to_gregorian());
            prop_assert_eq!(back, Ok(date));
        }

        /// Consecutive Jalaali days map to consecutive Gregorian days.
        #[test]
        fn next_day_is_one_gregorian_day_later(date in valid_date()) {
            let next = date.to_gregorian().succ_opt().unwrap();
            if let Ok(j) = JalaaliDate::from_gregorian(next) {
                prop_assert!(j > date);
                prop_assert_eq!((j.to_gregorian() - date.to_gregorian()).num_days(), 1);
            }
        }
    }
}
