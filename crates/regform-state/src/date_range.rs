//! # Date Range Propagation
//!
//! Two pickers, start and end, both on the Jalaali calendar. The form
//! stores Gregorian strings.
//!
//! ## States
//!
//! ```text
//! NoStart ──select_start(d)──▶ StartSelected { min_end: d }
//!                                   │
//!                                   └──select_start(d')──▶ StartSelected { min_end: d' }
//! ```
//!
//! Every `select_start` clears the end date, forcing it to be picked again
//! against the new bound. `select_end` records nothing beyond the value.
//! End dates before `min_end` are refused; the schema does not re-check
//! the order.

use regform_core::{convert_date, FormValues, JalaaliDate};

use crate::error::StateError;

/// Whether a start date, and therefore an end-date bound, exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateRangeState {
    /// No start date picked yet; the end picker is unbounded.
    #[default]
    NoStart,
    /// A start date was picked; end dates before it are disabled.
    StartSelected {
        /// Earliest selectable end date.
        min_end: JalaaliDate,
    },
}

impl DateRangeState {
    /// Whether the end picker would offer `date`.
    pub fn accepts_end(&self, date: &JalaaliDate) -> bool {
        match self {
            Self::NoStart => true,
            Self::StartSelected { min_end } => date >= min_end,
        }
    }
}

/// Start/end picker pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    state: DateRangeState,
    start: Option<JalaaliDate>,
    end: Option<JalaaliDate>,
}

impl DateRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DateRangeState {
        self.state
    }

    /// Bound the end picker subscribes to.
    pub fn min_end(&self) -> Option<JalaaliDate> {
        match self.state {
            DateRangeState::NoStart => None,
            DateRangeState::StartSelected { min_end } => Some(min_end),
        }
    }

    /// Last picked start date.
    pub fn start(&self) -> Option<JalaaliDate> {
        self.start
    }

    /// Last picked end date, if not cleared since.
    pub fn end(&self) -> Option<JalaaliDate> {
        self.end
    }

    /// Start picked: record the bound, store the start, clear the end.
    pub fn select_start(&mut self, values: &mut FormValues, date: JalaaliDate) {
        self.state = DateRangeState::StartSelected { min_end: date };
        self.start = Some(date);
        self.end = None;
        values.start_date = convert_date(&date);
        values.end_date.clear();
        tracing::debug!(
            start = %date,
            stored = %values.start_date,
            "start date selected; end date cleared"
        );
    }

    /// End picked: store it unless it precedes the bound.
    pub fn select_end(
        &mut self,
        values: &mut FormValues,
        date: JalaaliDate,
    ) -> Result<(), StateError> {
        if let DateRangeState::StartSelected { min_end } = self.state {
            if date < min_end {
                return Err(StateError::EndBeforeMinimum { end: date, min: min_end });
            }
        }
        self.end = Some(date);
        values.end_date = convert_date(&date);
        tracing::debug!(end = %date, stored = %values.end_date, "end date selected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> JalaaliDate {
        JalaaliDate::new(y, m, day).unwrap()
    }

    #[test]
    fn starts_unbounded() {
        let range = DateRange::new();
        assert_eq!(range.state(), DateRangeState::NoStart);
        assert_eq!(range.min_end(), None);
        assert!(range.state().accepts_end(&d(1300, 1, 1)));
    }

    #[test]
    fn select_start_records_bound_and_converts() {
        let mut range = DateRange::new();
        let mut values = FormValues::default();
        range.select_start(&mut values, d(1403, 1, 1));
        assert_eq!(range.min_end(), Some(d(1403, 1, 1)));
        assert_eq!(values.start_date, "2024-03-20");
    }

    #[test]
    fn changing_start_clears_end() {
        let mut range = DateRange::new();
        let mut values = FormValues::default();
        range.select_start(&mut values, d(1403, 1, 1));
        range.select_end(&mut values, d(1403, 1, 10)).unwrap();
        assert_eq!(values.end_date, "2024-03-29");

        range.select_start(&mut values, d(1403, 1, 5));
        assert!(values.end_date.is_empty());
        assert_eq!(range.end(), None);
        assert_eq!(values.start_date, "2024-03-24");
    }

    #[test]
    fn reselecting_same_start_still_clears_end() {
        let mut range = DateRange::new();
        let mut values = FormValues::default();
        range.select_start(&mut values, d(1403, 2, 1));
        range.select_end(&mut values, d(1403, 2, 2)).unwrap();
        range.select_start(&mut values, d(1403, 2, 1));
        assert!(values.end_date.is_empty());
    }

    #[test]
    fn end_before_bound_rejected() {
        let mut range = DateRange::new();
        let mut values = FormValues::default();
        range.select_start(&mut values, d(1403, 5, 10));
        let err = range.select_end(&mut values, d(1403, 5, 9)).unwrap_err();
        assert_eq!(
            err,
            StateError::EndBeforeMinimum {
                end: d(1403, 5, 9),
                min: d(1403, 5, 10),
            }
        );
        assert!(values.end_date.is_empty());
    }

    #[test]
    fn end_equal_to_bound_accepted() {
        let mut range = DateRange::new();
        let mut values = FormValues::default();
        range.select_start(&mut values, d(1403, 5, 10));
        range.select_end(&mut values, d(1403, 5, 10)).unwrap();
        assert_eq!(values.end_date, values.start_date);
    }

    #[test]
    fn end_without_start_is_allowed() {
        let mut range = DateRange::new();
        let mut values = FormValues::default();
        range.select_end(&mut values, d(1402, 12, 29)).unwrap();
        assert_eq!(values.end_date, "2024-03-19");
        assert_eq!(range.state(), DateRangeState::NoStart);
    }
}
