//! Expense repository. Every write and its ledger reconciliation share one
//! transaction.

use chrono::{NaiveDate, Utc};
use purse_core::expense::{normalize_description, validate_expense_amount};
use purse_core::patch::Patch;
use purse_shared::types::{BudgetId, CategoryId, ExpenseId, UserId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use super::{budget, category};
use crate::entities::expenses;
use crate::error::{RepositoryError, RepositoryResult};
use crate::reconciler::ExpenseReconciler;

/// Input for creating an expense.
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    /// Amount, at most two decimals, zero allowed.
    pub amount: Decimal,
    /// Budget to charge, if any.
    pub budget_id: Option<BudgetId>,
    /// Category label, if any.
    pub category_id: Option<CategoryId>,
    /// Payment date.
    pub pay_date: Option<NaiveDate>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Partial expense update.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    /// New amount.
    pub amount: Option<Decimal>,
    /// Budget link change.
    pub budget_id: Patch<BudgetId>,
    /// Category link change.
    pub category_id: Patch<CategoryId>,
    /// Payment date change.
    pub pay_date: Patch<NaiveDate>,
    /// Description change.
    pub description: Patch<String>,
}

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an expense and charges its budget.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad amount or description, and
    /// `NotFound` when the budget or category is not the caller's.
    pub async fn create(
        &self,
        user_id: UserId,
        input: NewExpense,
    ) -> RepositoryResult<expenses::Model> {
        let amount_minor = validate_expense_amount(input.amount)?;
        let description = match input.description {
            Some(text) => normalize_description(&text)?,
            None => None,
        };

        let txn = self.db.begin().await?;
        check_links(&txn, user_id, input.budget_id, input.category_id).await?;

        let now = Utc::now().into();
        let expense = expenses::ActiveModel {
            id: Set(ExpenseId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            amount_minor: Set(amount_minor),
            pay_date: Set(input.pay_date),
            description: Set(description),
            category_id: Set(input.category_id.map(CategoryId::into_inner)),
            budget_id: Set(input.budget_id.map(BudgetId::into_inner)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        ExpenseReconciler::on_expense_created(&txn, &expense).await?;
        txn.commit().await?;

        debug!(expense_id = %expense.id, user_id = %user_id, "Expense created");
        Ok(expense)
    }

    /// Gets one of the caller's expenses.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the expense does not exist or belongs to another user.
    pub async fn get(
        &self,
        user_id: UserId,
        expense_id: ExpenseId,
    ) -> RepositoryResult<expenses::Model> {
        find_owned(&self.db, user_id, expense_id).await
    }

    /// Lists the caller's expenses, most recent payment date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<expenses::Model>> {
        Ok(expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(expenses::Column::PayDate)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Applies a partial update and reconciles the budget ledger against the
    /// state captured just before the write.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing expense or foreign budget/category, or
    /// a validation error.
    pub async fn update(
        &self,
        user_id: UserId,
        expense_id: ExpenseId,
        patch: ExpensePatch,
    ) -> RepositoryResult<expenses::Model> {
        let amount_minor = patch.amount.map(validate_expense_amount).transpose()?;
        let description = match patch.description {
            Patch::Set(text) => normalize_description(&text)?.into(),
            other => other,
        };

        let txn = self.db.begin().await?;
        let current = lock_owned(&txn, user_id, expense_id).await?;

        check_links(
            &txn,
            user_id,
            patch.budget_id.as_set().copied(),
            patch.category_id.as_set().copied(),
        )
        .await?;

        let prior = ExpenseReconciler::on_expense_will_update(&txn, expense_id).await?;

        let mut active: expenses::ActiveModel = current.clone().into();
        if let Some(minor) = amount_minor {
            active.amount_minor = Set(minor);
        }
        if patch.budget_id.is_change() {
            active.budget_id =
                Set(patch.budget_id.map(BudgetId::into_inner).apply(current.budget_id));
        }
        if patch.category_id.is_change() {
            active.category_id =
                Set(patch.category_id.map(CategoryId::into_inner).apply(current.category_id));
        }
        if patch.pay_date.is_change() {
            active.pay_date = Set(patch.pay_date.apply(current.pay_date));
        }
        if description.is_change() {
            active.description = Set(description.apply(current.description));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        ExpenseReconciler::on_expense_updated(&txn, &updated, &prior).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Deletes an expense and refunds its budget.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the expense does not exist or belongs to another user.
    pub async fn delete(&self, user_id: UserId, expense_id: ExpenseId) -> RepositoryResult<()> {
        let txn = self.db.begin().await?;
        let expense = lock_owned(&txn, user_id, expense_id).await?;

        let result = expenses::Entity::delete_by_id(expense.id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Expense", expense_id));
        }
        ExpenseReconciler::on_expense_deleted(&txn, &expense).await?;
        txn.commit().await?;

        debug!(expense_id = %expense.id, user_id = %user_id, "Expense deleted");
        Ok(())
    }
}

async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    expense_id: ExpenseId,
) -> RepositoryResult<expenses::Model> {
    expenses::Entity::find_by_id(expense_id.into_inner())
        .filter(expenses::Column::UserId.eq(user_id.into_inner()))
        .one(conn)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Expense", expense_id))
}

/// Like [`find_owned`], but holds a row lock until the transaction ends so
/// concurrent writes to the same expense reconcile one after the other.
async fn lock_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    expense_id: ExpenseId,
) -> RepositoryResult<expenses::Model> {
    expenses::Entity::find_by_id(expense_id.into_inner())
        .filter(expenses::Column::UserId.eq(user_id.into_inner()))
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Expense", expense_id))
}

async fn check_links<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    budget_id: Option<BudgetId>,
    category_id: Option<CategoryId>,
) -> RepositoryResult<()> {
    if let Some(budget_id) = budget_id {
        budget::find_owned(conn, user_id, budget_id).await?;
    }
    if let Some(category_id) = category_id {
        category::find_owned(conn, user_id, category_id).await?;
    }
    Ok(())
}
