//! Profile error types.

use thiserror::Error;

use crate::schedule::PayDayError;

/// Profile validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// First or last name too long.
    #[error("Name cannot exceed {max} characters")]
    NameTooLong {
        /// Maximum length.
        max: usize,
    },

    /// Email address is malformed.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Pay day or salary day is not `01`..`31`.
    #[error(transparent)]
    PayDay(#[from] PayDayError),

    /// Budget, saving or income target below zero.
    #[error("{field} cannot be negative")]
    NegativeTarget {
        /// Offending field.
        field: &'static str,
    },
}
