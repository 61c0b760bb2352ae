//! Reconciliation planning.

use super::types::{ExpenseSnapshot, LedgerAdjustment, PriorState, ReconciliationPlan};

/// Plans the budget ledger adjustments for expense lifecycle transitions.
pub struct Reconciler;

impl Reconciler {
    /// Plan for a newly created expense: charge its budget, if any.
    #[must_use]
    pub fn plan_create(created: &ExpenseSnapshot) -> ReconciliationPlan {
        let mut plan = ReconciliationPlan::empty();
        if let Some(budget_id) = created.budget_id {
            plan.push(LedgerAdjustment::charge(budget_id, created.amount));
        }
        plan
    }

    /// Plan for an updated expense.
    ///
    /// - Budget link changed (either side may be none): refund the old budget
    ///   by the old amount, then charge the new budget by the new amount.
    /// - Same budget, amount changed: one net adjustment of `new - old`.
    /// - Nothing relevant changed: empty plan.
    ///
    /// With [`PriorState::Missing`] the old side is unknown; only the charge
    /// against the current budget is planned and the plan is flagged.
    #[must_use]
    pub fn plan_update(prior: &PriorState, current: &ExpenseSnapshot) -> ReconciliationPlan {
        let Some(old) = prior.snapshot() else {
            let mut plan = Self::plan_create(current);
            plan.mark_recovered();
            return plan;
        };

        let mut plan = ReconciliationPlan::empty();

        if old.budget_id != current.budget_id {
            if let Some(old_budget) = old.budget_id {
                plan.push(LedgerAdjustment::refund(old_budget, old.amount));
            }
            if let Some(new_budget) = current.budget_id {
                plan.push(LedgerAdjustment::charge(new_budget, current.amount));
            }
        } else if let Some(budget_id) = current.budget_id {
            if current.amount != old.amount {
                plan.push(LedgerAdjustment::charge(
                    budget_id,
                    current.amount - old.amount,
                ));
            }
        }

        plan
    }

    /// Plan for a deleted expense: refund its budget, if any.
    #[must_use]
    pub fn plan_delete(deleted: &ExpenseSnapshot) -> ReconciliationPlan {
        let mut plan = ReconciliationPlan::empty();
        if let Some(budget_id) = deleted.budget_id {
            plan.push(LedgerAdjustment::refund(budget_id, deleted.amount));
        }
        plan
    }
}
