//! Reconciliation value types.

use purse_shared::types::BudgetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The reconciliation-relevant part of an expense: its budget link and amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSnapshot {
    /// Linked budget, or `None` when unbudgeted.
    pub budget_id: Option<BudgetId>,
    /// Expense amount.
    pub amount: Decimal,
}

impl ExpenseSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(budget_id: Option<BudgetId>, amount: Decimal) -> Self {
        Self { budget_id, amount }
    }

    /// Snapshot of an expense with no budget link.
    #[must_use]
    pub const fn unbudgeted(amount: Decimal) -> Self {
        Self {
            budget_id: None,
            amount,
        }
    }
}

/// Expense state captured immediately before an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorState {
    /// The stored state was read successfully.
    Captured(ExpenseSnapshot),
    /// The stored record could not be read; the update is reconciled from
    /// current values only.
    Missing,
}

impl PriorState {
    /// Returns the captured snapshot, if any.
    #[must_use]
    pub const fn snapshot(&self) -> Option<ExpenseSnapshot> {
        match self {
            Self::Captured(snapshot) => Some(*snapshot),
            Self::Missing => None,
        }
    }
}

impl From<Option<ExpenseSnapshot>> for PriorState {
    fn from(snapshot: Option<ExpenseSnapshot>) -> Self {
        snapshot.map_or(Self::Missing, Self::Captured)
    }
}

/// One `apply_delta` call: `remaining -= delta` on `budget_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAdjustment {
    /// Target budget.
    pub budget_id: BudgetId,
    /// Amount newly attributed to the budget (negative for refunds).
    pub delta: Decimal,
}

impl LedgerAdjustment {
    /// A charge of `amount` against `budget_id`.
    #[must_use]
    pub const fn charge(budget_id: BudgetId, amount: Decimal) -> Self {
        Self {
            budget_id,
            delta: amount,
        }
    }

    /// A refund of `amount` to `budget_id`.
    #[must_use]
    pub fn refund(budget_id: BudgetId, amount: Decimal) -> Self {
        Self {
            budget_id,
            delta: -amount,
        }
    }
}

/// The ledger adjustments for one expense transition.
///
/// Holds at most two adjustments (a refund and a charge on a budget move).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationPlan {
    adjustments: Vec<LedgerAdjustment>,
    recovered_without_prior: bool,
}

impl ReconciliationPlan {
    /// A plan that changes nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            adjustments: Vec::new(),
            recovered_without_prior: false,
        }
    }

    pub(crate) fn push(&mut self, adjustment: LedgerAdjustment) {
        self.adjustments.push(adjustment);
    }

    pub(crate) fn mark_recovered(&mut self) {
        self.recovered_without_prior = true;
    }

    /// Adjustments in application order.
    #[must_use]
    pub fn adjustments(&self) -> &[LedgerAdjustment] {
        &self.adjustments
    }

    /// Number of ledger calls this plan makes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    /// Returns true if no ledger call is needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }

    /// Returns true if the plan was built without a captured prior state,
    /// meaning any previously attributed amount could not be refunded.
    #[must_use]
    pub const fn recovered_without_prior(&self) -> bool {
        self.recovered_without_prior
    }
}

impl<'a> IntoIterator for &'a ReconciliationPlan {
    type Item = &'a LedgerAdjustment;
    type IntoIter = std::slice::Iter<'a, LedgerAdjustment>;

    fn into_iter(self) -> Self::IntoIter {
        self.adjustments.iter()
    }
}
