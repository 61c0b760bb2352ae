//! Executes reconciliation plans against the budget ledger.
//!
//! Every hook takes the caller's connection or open transaction so the ledger
//! writes commit or roll back together with the expense write they follow.

use purse_core::reconcile::{LedgerAdjustment, PriorState, ReconciliationPlan, Reconciler};
use purse_shared::types::ExpenseId;
use sea_orm::{ConnectionTrait, EntityTrait};
use tracing::{debug, warn};

use crate::entities::expenses;
use crate::error::RepositoryResult;
use crate::repositories::BudgetRepository;

/// What executing a plan did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Adjustments written to an existing budget.
    pub applied: Vec<LedgerAdjustment>,
    /// Adjustments whose budget no longer exists.
    pub skipped: Vec<LedgerAdjustment>,
    /// The update was reconciled without a captured prior state.
    pub recovered_without_prior: bool,
}

/// Keeps budget remaining amounts in step with expense writes.
pub struct ExpenseReconciler;

impl ExpenseReconciler {
    /// Charges the new expense's budget, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a ledger write fails.
    pub async fn on_expense_created<C: ConnectionTrait>(
        conn: &C,
        expense: &expenses::Model,
    ) -> RepositoryResult<ReconcileOutcome> {
        let plan = Reconciler::plan_create(&expense.snapshot());
        execute(conn, expense.id.into(), &plan).await
    }

    /// Captures the stored budget link and amount before an update.
    ///
    /// A missing row yields [`PriorState::Missing`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn on_expense_will_update<C: ConnectionTrait>(
        conn: &C,
        expense_id: ExpenseId,
    ) -> RepositoryResult<PriorState> {
        let stored = expenses::Entity::find_by_id(expense_id.into_inner())
            .one(conn)
            .await?;

        Ok(stored.as_ref().map(expenses::Model::snapshot).into())
    }

    /// Applies the difference between `prior` and the updated expense.
    ///
    /// # Errors
    ///
    /// Returns an error if a ledger write fails.
    pub async fn on_expense_updated<C: ConnectionTrait>(
        conn: &C,
        expense: &expenses::Model,
        prior: &PriorState,
    ) -> RepositoryResult<ReconcileOutcome> {
        let plan = Reconciler::plan_update(prior, &expense.snapshot());
        execute(conn, expense.id.into(), &plan).await
    }

    /// Refunds the deleted expense's budget, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a ledger write fails.
    pub async fn on_expense_deleted<C: ConnectionTrait>(
        conn: &C,
        expense: &expenses::Model,
    ) -> RepositoryResult<ReconcileOutcome> {
        let plan = Reconciler::plan_delete(&expense.snapshot());
        execute(conn, expense.id.into(), &plan).await
    }
}

async fn execute<C: ConnectionTrait>(
    conn: &C,
    expense_id: ExpenseId,
    plan: &ReconciliationPlan,
) -> RepositoryResult<ReconcileOutcome> {
    let mut outcome = ReconcileOutcome {
        recovered_without_prior: plan.recovered_without_prior(),
        ..ReconcileOutcome::default()
    };

    if plan.recovered_without_prior() {
        warn!(
            expense_id = %expense_id,
            "Prior expense state unavailable; reconciled from current values only"
        );
    }

    for adjustment in plan {
        if BudgetRepository::apply_delta(conn, adjustment.budget_id, adjustment.delta).await? {
            debug!(
                expense_id = %expense_id,
                budget_id = %adjustment.budget_id,
                delta = %adjustment.delta,
                "Budget adjusted"
            );
            outcome.applied.push(*adjustment);
        } else {
            warn!(
                expense_id = %expense_id,
                budget_id = %adjustment.budget_id,
                delta = %adjustment.delta,
                "Budget not found; adjustment skipped"
            );
            outcome.skipped.push(*adjustment);
        }
    }

    Ok(outcome)
}
