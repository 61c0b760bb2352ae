//! Budget error types.

use thiserror::Error;

use crate::amount::AmountError;

/// Budget-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Budget name is empty.
    #[error("Budget name cannot be empty")]
    EmptyName,

    /// Budget name is longer than the stored column allows.
    #[error("Budget name cannot exceed {max} characters")]
    NameTooLong {
        /// Maximum length.
        max: usize,
    },

    /// Nominal amount is invalid.
    #[error("Invalid budget amount: {0}")]
    InvalidAmount(#[from] AmountError),
}
