//! Budget data types.

use purse_shared::types::{BudgetId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use crate::amount::validate_amount;

/// Maximum budget name length.
pub const MAX_NAME_LEN: usize = 100;

/// A spending envelope with a nominal amount and a live remaining amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Nominal amount set by the owner.
    pub amount: Decimal,
    /// Amount left after the currently linked expenses.
    pub remaining_amount: Decimal,
}

impl Budget {
    /// Creates a fresh budget whose remaining amount equals its nominal amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or too long, or the amount is
    /// negative or has more than two decimals.
    pub fn new(
        id: BudgetId,
        user_id: UserId,
        name: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, BudgetError> {
        let name = validate_name(name.into())?;
        validate_amount(amount)?;

        Ok(Self {
            id,
            user_id,
            name,
            amount,
            remaining_amount: amount,
        })
    }

    /// Total currently attributed to this budget.
    #[must_use]
    pub fn spent(&self) -> Decimal {
        self.amount - self.remaining_amount
    }

    /// Returns true when linked expenses exceed the nominal amount.
    #[must_use]
    pub fn is_overspent(&self) -> bool {
        self.remaining_amount < Decimal::ZERO
    }
}

/// Owner-editable budget fields. `remaining_amount` is derived and never set directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetUpdate {
    /// New name.
    pub name: Option<String>,
    /// New nominal amount.
    pub amount: Option<Decimal>,
}

impl BudgetUpdate {
    /// Validates the provided fields and returns the trimmed name, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a provided field is invalid.
    pub fn validate(&self) -> Result<Option<String>, BudgetError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        self.name.clone().map(validate_name).transpose()
    }
}

/// Trims and checks a budget name.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or too long.
pub fn validate_name(name: String) -> Result<String, BudgetError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(BudgetError::NameTooLong { max: MAX_NAME_LEN });
    }
    Ok(trimmed.to_string())
}
