//! # regform-state — Form State Machines
//!
//! Everything that reacts to user input lives here. Each reaction is an
//! explicit transition method rather than a side effect hidden in an event
//! handler, so each can be tested on its own.
//!
//! ## State Machines
//!
//! - **Cascade** (`cascade.rs`): country selection drives the city list.
//!   A changed, non-empty country recomputes the list from the static table
//!   and resets the chosen city.
//!
//! - **Date range** (`date_range.rs`): `NoStart → StartSelected { min_end }`.
//!   Picking a start date records the bound for the end picker, stores the
//!   converted start date, and always clears the end date.
//!
//! - **Constrained input** (`input.rs`): a pure predicate over
//!   "current value + proposed edit" for digit-only, max-length and
//!   fixed-prefix text fields, plus a small text buffer that applies it.
//!
//! - **Form** (`form.rs`): owns the record and all of the above, re-runs the
//!   schema after every accepted change, and gates submission on an empty
//!   error map.
//!
//! ## Concurrency
//!
//! None. The form is owned by one caller and mutated only through `&mut`
//! entry points; each runs to completion before the next.

pub mod cascade;
pub mod date_range;
pub mod error;
pub mod form;
pub mod input;

pub use cascade::{CitySelector, EmptyCountryPolicy};
pub use date_range::{DateRange, DateRangeState};
pub use error::{StateError, SubmitError};
pub use form::{LogSubmission, RegistrationForm, SubmitHandler};
pub use input::{InputConstraint, Key, KeyOutcome, Selection, TextInput};
