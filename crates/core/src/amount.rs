//! Amount validation shared by budgets, expenses and recurring schedules.

use purse_shared::types::{MoneyError, from_minor_units, to_minor_units};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors for user-supplied amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    Negative,

    /// Amount exceeds ten significant digits.
    #[error("Amount cannot exceed {max}")]
    TooLarge {
        /// Largest accepted amount.
        max: Decimal,
    },

    /// Amount cannot be represented in two-place minor units.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Largest accepted amount in minor units: `99_999_999.99`.
pub const MAX_AMOUNT_MINOR: i64 = 9_999_999_999;

/// Validates a user-supplied amount and returns its minor-unit form.
///
/// Zero is a legal amount. Amounts are capped at ten digits so ledger
/// arithmetic on the stored `i64` cents cannot overflow.
///
/// # Errors
///
/// Returns `AmountError::Negative` for amounts below zero and
/// `AmountError::Money` for amounts with more than two decimals, and
/// `AmountError::TooLarge` above `99_999_999.99`.
pub fn validate_amount(amount: Decimal) -> Result<i64, AmountError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative);
    }
    let minor = to_minor_units(amount).map_err(|err| match err {
        MoneyError::OutOfRange(_) => too_large(),
        other => AmountError::Money(other),
    })?;
    if minor > MAX_AMOUNT_MINOR {
        return Err(too_large());
    }
    Ok(minor)
}

fn too_large() -> AmountError {
    AmountError::TooLarge {
        max: from_minor_units(MAX_AMOUNT_MINOR),
    }
}
