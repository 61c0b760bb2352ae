//! Remaining-amount arithmetic.
//!
//! The ledger is the only sanctioned way to change a budget's remaining
//! amount. The database layer performs the same arithmetic as single atomic
//! statements; these functions define the semantics and serve in-memory
//! callers.

use rust_decimal::Decimal;

use super::types::Budget;
use crate::reconcile::{LedgerAdjustment, ReconciliationPlan};

/// Ledger operations on budgets.
pub struct BudgetLedger;

impl BudgetLedger {
    /// Attributes `delta` to the budget: `remaining -= delta`.
    ///
    /// Positive deltas are money newly spent against the budget, negative
    /// deltas are refunds. Not idempotent: every call is one economic event.
    /// No sanity check is made; the remaining amount may go negative.
    pub fn apply_delta(budget: &mut Budget, delta: Decimal) {
        budget.remaining_amount -= delta;
    }

    /// Restores the remaining amount to the nominal amount.
    ///
    /// Returns true if the remaining amount changed.
    pub fn reset(budget: &mut Budget) -> bool {
        let changed = budget.remaining_amount != budget.amount;
        budget.remaining_amount = budget.amount;
        changed
    }

    /// Shift applied to the remaining amount when the nominal amount is edited.
    ///
    /// Moving the nominal amount by `d` moves the remaining amount by `d`,
    /// keeping `remaining == amount - spent`.
    #[must_use]
    pub fn rebase_shift(old_amount: Decimal, new_amount: Decimal) -> Decimal {
        new_amount - old_amount
    }

    /// Sets a new nominal amount and shifts the remaining amount with it.
    pub fn rebase(budget: &mut Budget, new_amount: Decimal) {
        budget.remaining_amount += Self::rebase_shift(budget.amount, new_amount);
        budget.amount = new_amount;
    }

    /// Applies every adjustment of a plan to the matching budget in `budgets`.
    ///
    /// Adjustments targeting a budget not present are skipped and returned.
    pub fn apply_plan<'a>(
        budgets: impl IntoIterator<Item = &'a mut Budget>,
        plan: &ReconciliationPlan,
    ) -> Vec<LedgerAdjustment> {
        let mut budgets: Vec<&mut Budget> = budgets.into_iter().collect();
        let mut skipped = Vec::new();

        for adjustment in plan.adjustments() {
            match budgets.iter_mut().find(|b| b.id == adjustment.budget_id) {
                Some(budget) => Self::apply_delta(budget, adjustment.delta),
                None => skipped.push(*adjustment),
            }
        }

        skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purse_shared::types::{BudgetId, UserId};
    use rust_decimal_macros::dec;

    fn budget(amount: Decimal) -> Budget {
        Budget::new(BudgetId::new(), UserId::new(), "Food", amount).unwrap()
    }

    #[test]
    fn test_apply_delta_spends_and_refunds() {
        let mut b = budget(dec!(2000));
        BudgetLedger::apply_delta(&mut b, dec!(300));
        assert_eq!(b.remaining_amount, dec!(1700));
        BudgetLedger::apply_delta(&mut b, dec!(-300));
        assert_eq!(b.remaining_amount, dec!(2000));
    }

    #[test]
    fn test_overspending_goes_negative() {
        let mut b = budget(dec!(100));
        BudgetLedger::apply_delta(&mut b, dec!(250.50));
        assert_eq!(b.remaining_amount, dec!(-150.50));
        assert!(b.is_overspent());
        assert_eq!(b.spent(), dec!(250.50));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut b = budget(dec!(1000));
        BudgetLedger::apply_delta(&mut b, dec!(420));

        assert!(BudgetLedger::reset(&mut b));
        assert_eq!(b.remaining_amount, dec!(1000));

        assert!(!BudgetLedger::reset(&mut b));
        assert_eq!(b.remaining_amount, dec!(1000));
    }

    #[test]
    fn test_rebase_keeps_spent_constant() {
        let mut b = budget(dec!(1000));
        BudgetLedger::apply_delta(&mut b, dec!(200));

        BudgetLedger::rebase(&mut b, dec!(1500));
        assert_eq!(b.amount, dec!(1500));
        assert_eq!(b.remaining_amount, dec!(1300));
        assert_eq!(b.spent(), dec!(200));

        BudgetLedger::rebase(&mut b, dec!(100));
        assert_eq!(b.remaining_amount, dec!(-100));
        assert_eq!(b.spent(), dec!(200));
    }
}
