//! Budgets and the remaining-amount ledger.

pub mod defaults;
pub mod error;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod tests;

pub use defaults::{DEFAULT_BUDGETS, DefaultBudget};
pub use error::BudgetError;
pub use ledger::BudgetLedger;
pub use types::{Budget, BudgetUpdate};
