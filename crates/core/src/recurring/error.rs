//! Recurring schedule error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::amount::AmountError;

/// Recurring schedule errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurringError {
    /// Unknown frequency code.
    #[error("Unknown frequency {0:?}, expected one of W, B, M, BM")]
    InvalidFrequency(String),

    /// End date precedes start date.
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Description is longer than the stored column allows.
    #[error("Description cannot exceed {max} characters")]
    DescriptionTooLong {
        /// Maximum length.
        max: usize,
    },

    /// Template amount is invalid.
    #[error("Invalid recurring amount: {0}")]
    InvalidAmount(#[from] AmountError),
}
