//! # Constrained Text Input
//!
//! Text fields that may be restricted to digits, to a maximum length, and
//! to a mandatory literal prefix (phone numbers must start with `09`).
//!
//! The constraint is a pure predicate over the current value and a
//! proposed edit. Nothing here simulates key events; [`TextInput`] is just
//! a value plus selection that asks the predicate before changing.
//!
//! ## Prefix Rule
//!
//! A candidate value is compatible with prefix `p` when either `p` starts
//! with the candidate (the user is still typing the prefix) or the
//! candidate starts with `p` (the prefix is complete). Anything else is
//! rejected. This admits typing `0`, `09`, `091`, ... and rejects `1` or
//! `08` outright.
//!
//! ## Positions
//!
//! Selections and caret positions count characters, not bytes.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// A key press, named the way browsers report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    /// A printable character.
    Char(char),
    Backspace,
    Delete,
    Tab,
    ArrowLeft,
    ArrowRight,
    /// Any other named key (`Enter`, `Shift`, `Home`, ...).
    Named(String),
}

impl Key {
    /// Editing and navigation keys pass every constraint.
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            Self::Backspace | Self::Delete | Self::Tab | Self::ArrowLeft | Self::ArrowRight
        )
    }
}

impl FromStr for Key {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        Ok(match (chars.next(), chars.next()) {
            (Some(c), None) => Self::Char(c),
            _ => match s {
                "Backspace" => Self::Backspace,
                "Delete" => Self::Delete,
                "Tab" => Self::Tab,
                "ArrowLeft" => Self::ArrowLeft,
                "ArrowRight" => Self::ArrowRight,
                other => Self::Named(other.to_string()),
            },
        })
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(key) => key,
            Err(never) => match never {},
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => c.to_string(),
            Key::Backspace => "Backspace".to_string(),
            Key::Delete => "Delete".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::ArrowLeft => "ArrowLeft".to_string(),
            Key::ArrowRight => "ArrowRight".to_string(),
            Key::Named(name) => name,
        }
    }
}

/// A selected range of characters; `start == end` is a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    start: usize,
    end: usize,
}

impl Selection {
    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// A range between two positions, in either order.
    pub fn range(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    fn clamp(self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}

/// Byte offset of character index `idx`, or the end of `s`.
fn byte_offset(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map_or(s.len(), |(b, _)| b)
}

/// Replace the selected characters of `value` with `text`.
fn splice(value: &str, selection: Selection, text: &str) -> String {
    let start = byte_offset(value, selection.start);
    let end = byte_offset(value, selection.end);
    let mut out = String::with_capacity(value.len() + text.len());
    out.push_str(&value[..start]);
    out.push_str(text);
    out.push_str(&value[end..]);
    out
}

/// Restrictions on what a text field may hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConstraint {
    /// Only ASCII digits may be typed.
    pub digits_only: bool,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    /// Literal the value must begin with once long enough.
    pub required_prefix: Option<String>,
}

impl InputConstraint {
    /// No restrictions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Iranian mobile numbers: digits only, 11 long, starting with `09`.
    pub fn phone() -> Self {
        Self {
            digits_only: true,
            max_length: Some(11),
            required_prefix: Some("09".to_string()),
        }
    }

    /// Length and prefix checks shared by keystrokes and whole-value changes.
    fn fits(&self, candidate: &str) -> bool {
        if let Some(max) = self.max_length {
            if candidate.chars().count() > max {
                return false;
            }
        }
        match &self.required_prefix {
            Some(prefix) => prefix.starts_with(candidate) || candidate.starts_with(prefix.as_str()),
            None => true,
        }
    }

    /// Whether a pasted or programmatically set value may replace the
    /// field's content.
    pub fn accepts_value(&self, candidate: &str) -> bool {
        if self.digits_only && !candidate.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        self.fits(candidate)
    }

    /// Whether `key`, pressed with `selection` active in `value`, may go
    /// through.
    pub fn accepts_key(&self, value: &str, selection: Selection, key: &Key) -> bool {
        match key {
            k if k.is_editing() => true,
            Key::Char(c) => {
                if self.digits_only && !c.is_ascii_digit() {
                    return false;
                }
                let mut buf = [0u8; 4];
                self.fits(&splice(value, selection, c.encode_utf8(&mut buf)))
            }
            // The browser would insert the key's name as text.
            Key::Named(name) => {
                !self.digits_only
                    && (self.required_prefix.is_none()
                        || self.fits(&splice(value, selection, name)))
            }
            _ => true,
        }
    }
}

/// What a key press did to a [`TextInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOutcome {
    /// A character was inserted.
    Inserted,
    /// Characters were removed.
    Deleted,
    /// Only the caret moved.
    Moved,
    /// The key had no effect on the value (focus keys, deleting at an edge).
    Ignored,
    /// The constraint refused the key; nothing changed.
    Rejected,
}

/// A text field's value, selection and constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    selection: Selection,
    constraint: InputConstraint,
}

impl TextInput {
    pub fn new(constraint: InputConstraint) -> Self {
        Self {
            value: String::new(),
            selection: Selection::default(),
            constraint,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn constraint(&self) -> &InputConstraint {
        &self.constraint
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Move the selection, clamped to the value.
    pub fn select(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.len());
    }

    /// Apply one key press.
    pub fn press(&mut self, key: &Key) -> KeyOutcome {
        if !self.constraint.accepts_key(&self.value, self.selection, key) {
            return KeyOutcome::Rejected;
        }

        let Selection { start, end } = self.selection;
        match key {
            Key::Char(c) => {
                let mut buf = [0u8; 4];
                self.value = splice(&self.value, self.selection, c.encode_utf8(&mut buf));
                self.selection = Selection::caret(start + 1);
                KeyOutcome::Inserted
            }
            Key::Backspace => {
                let range = if start != end {
                    self.selection
                } else if start > 0 {
                    Selection::range(start - 1, start)
                } else {
                    return KeyOutcome::Ignored;
                };
                self.delete(range)
            }
            Key::Delete => {
                let range = if start != end {
                    self.selection
                } else if end < self.len() {
                    Selection::range(end, end + 1)
                } else {
                    return KeyOutcome::Ignored;
                };
                self.delete(range)
            }
            Key::ArrowLeft => {
                let pos = if start != end { start } else { start.saturating_sub(1) };
                self.selection = Selection::caret(pos);
                KeyOutcome::Moved
            }
            Key::ArrowRight => {
                let pos = if start != end { end } else { (end + 1).min(self.len()) };
                self.selection = Selection::caret(pos);
                KeyOutcome::Moved
            }
            Key::Tab | Key::Named(_) => KeyOutcome::Ignored,
        }
    }

    /// Deletions still pass through the whole-value check, so the prefix
    /// cannot be broken from the middle.
    fn delete(&mut self, range: Selection) -> KeyOutcome {
        let candidate = splice(&self.value, range, "");
        if !self.constraint.accepts_value(&candidate) {
            return KeyOutcome::Rejected;
        }
        self.value = candidate;
        self.selection = Selection::caret(range.start);
        KeyOutcome::Deleted
    }

    /// Insert `text` over the selection, as a paste would.
    pub fn paste(&mut self, text: &str) -> bool {
        let candidate = splice(&self.value, self.selection, text);
        if !self.constraint.accepts_value(&candidate) {
            return false;
        }
        let caret = self.selection.start + text.chars().count();
        self.value = candidate;
        self.selection = Selection::caret(caret);
        true
    }

    /// Replace the whole value, as a programmatic change would.
    pub fn replace(&mut self, value: &str) -> bool {
        if !self.constraint.accepts_value(value) {
            return false;
        }
        self.value = value.to_string();
        self.selection = Selection::caret(self.len());
        true
    }
}
