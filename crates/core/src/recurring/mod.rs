//! Recurring expense and income templates.
//!
//! Templates are never materialised into expense rows here; they only carry
//! a schedule and an active flag. Deleting follows a two-step lifecycle:
//! `active -> inactive -> removed`.

pub mod error;
pub mod lifecycle;
pub mod types;

pub use error::RecurringError;
pub use lifecycle::{DeletionOutcome, deletion_outcome, validate_description, validate_schedule};
pub use types::{Frequency, RecurringKind};
