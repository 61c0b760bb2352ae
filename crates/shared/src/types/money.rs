//! Two-place money amounts and their minor-unit storage form.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts travel through the domain as `rust_decimal::Decimal` with at most
//! two fractional digits and are persisted as `i64` cents, so that balance
//! updates in the database are exact integer arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Number of fractional digits carried by every amount.
pub const SCALE: u32 = 2;

/// Errors converting between decimal amounts and minor units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Amount has more than two fractional digits.
    #[error("Amount {0} has more than two decimal places")]
    TooPrecise(Decimal),

    /// Amount does not fit in 64-bit minor units.
    #[error("Amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// Converts a two-place decimal amount to minor units (cents).
///
/// Trailing zeros beyond two places are accepted (`12.500` is `1250`);
/// significant digits beyond two places are rejected rather than rounded.
///
/// # Errors
///
/// Returns `MoneyError::TooPrecise` or `MoneyError::OutOfRange`.
pub fn to_minor_units(amount: Decimal) -> Result<i64, MoneyError> {
    let normalized = amount.normalize();
    if normalized.scale() > SCALE {
        return Err(MoneyError::TooPrecise(amount));
    }

    normalized
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or(MoneyError::OutOfRange(amount))
}

/// Converts minor units (cents) back to a two-place decimal amount.
#[must_use]
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, SCALE)
}
