//! Expense field validation.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::amount::{AmountError, validate_amount};

/// Longest stored expense description.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Expense validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    /// Amount is negative or too precise.
    #[error("Invalid expense amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// Description is too long.
    #[error("Description cannot exceed {max} characters")]
    DescriptionTooLong {
        /// Maximum length.
        max: usize,
    },
}

/// Validates an expense amount and returns it in minor units.
pub fn validate_expense_amount(amount: Decimal) -> Result<i64, ExpenseError> {
    Ok(validate_amount(amount)?)
}

/// Trims a description; blank becomes `None`.
pub fn normalize_description(description: &str) -> Result<Option<String>, ExpenseError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ExpenseError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(Some(trimmed.to_string()))
}
