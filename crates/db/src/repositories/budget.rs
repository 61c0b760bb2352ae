//! Budget repository: owner CRUD plus the atomic ledger primitives used by
//! the reconciler and the daily reset.

use chrono::Utc;
use purse_core::budget::{Budget, BudgetLedger, BudgetUpdate, DEFAULT_BUDGETS};
use purse_shared::types::{BudgetId, UserId, from_minor_units, to_minor_units};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{budgets, expenses};
use crate::error::{RepositoryError, RepositoryResult};

/// Repository for budget database operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a budget with `remaining_amount == amount`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or a negative or
    /// over-precise amount.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &str,
        amount: Decimal,
    ) -> RepositoryResult<Budget> {
        let budget = Budget::new(BudgetId::new(), user_id, name, amount)?;
        let model = insert_budget(&self.db, &budget).await?;
        debug!(budget_id = %model.id, user_id = %user_id, "Budget created");
        Ok(model.into())
    }

    /// Gets one of the caller's budgets.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the budget does not exist or belongs to another user.
    pub async fn get(&self, user_id: UserId, budget_id: BudgetId) -> RepositoryResult<Budget> {
        find_owned(&self.db, user_id, budget_id).await.map(Into::into)
    }

    /// Lists the caller's budgets, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<Budget>> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(budgets::Column::CreatedAt)
            .order_by_asc(budgets::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Renames a budget and/or changes its nominal amount.
    ///
    /// A new amount shifts `remaining_amount` by the same difference, applied
    /// as an atomic column expression so concurrent ledger deltas are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a validation error.
    pub async fn update(
        &self,
        user_id: UserId,
        budget_id: BudgetId,
        update: BudgetUpdate,
    ) -> RepositoryResult<Budget> {
        let name = update.validate()?;

        let txn = self.db.begin().await?;
        let current = find_owned(&txn, user_id, budget_id).await?;

        let mut stmt = budgets::Entity::update_many()
            .col_expr(budgets::Column::UpdatedAt, Expr::value(now()))
            .filter(budgets::Column::Id.eq(current.id));

        if let Some(name) = name {
            stmt = stmt.col_expr(budgets::Column::Name, Expr::value(name));
        }

        if let Some(amount) = update.amount {
            let shift = BudgetLedger::rebase_shift(from_minor_units(current.amount_minor), amount);
            let shift = to_minor_units(shift)?;
            let new_minor = to_minor_units(amount)?;
            stmt = stmt
                .col_expr(budgets::Column::AmountMinor, Expr::value(new_minor))
                .col_expr(
                    budgets::Column::RemainingMinor,
                    Expr::col(budgets::Column::RemainingMinor).add(shift),
                );
        }

        stmt.exec(&txn).await?;
        let updated = find_owned(&txn, user_id, budget_id).await?;
        txn.commit().await?;

        Ok(updated.into())
    }

    /// Deletes a budget after unlinking its expenses.
    ///
    /// No refunds are made: the budget itself disappears. Returns the number
    /// of expenses that became unbudgeted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the budget does not exist or belongs to another user.
    pub async fn delete(&self, user_id: UserId, budget_id: BudgetId) -> RepositoryResult<u64> {
        let txn = self.db.begin().await?;
        let budget = find_owned(&txn, user_id, budget_id).await?;

        let unlinked = expenses::Entity::update_many()
            .col_expr(expenses::Column::BudgetId, Expr::value(Option::<Uuid>::None))
            .filter(expenses::Column::BudgetId.eq(budget.id))
            .exec(&txn)
            .await?
            .rows_affected;

        budgets::Entity::delete_by_id(budget.id).exec(&txn).await?;
        txn.commit().await?;

        info!(budget_id = %budget.id, user_id = %user_id, unlinked, "Budget deleted");
        Ok(unlinked)
    }

    // ========================================================================
    // Ledger primitives
    // ========================================================================

    /// `remaining -= delta` on one budget row, as a single atomic statement.
    ///
    /// Returns `false` when no such budget exists. Runs on whatever
    /// connection or transaction the caller passes.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a delta with more than two decimals
    /// and a database error if the update fails.
    pub async fn apply_delta<C: ConnectionTrait>(
        conn: &C,
        budget_id: BudgetId,
        delta: Decimal,
    ) -> RepositoryResult<bool> {
        let delta_minor = to_minor_units(delta)?;

        let result = budgets::Entity::update_many()
            .col_expr(
                budgets::Column::RemainingMinor,
                Expr::col(budgets::Column::RemainingMinor).sub(delta_minor),
            )
            .col_expr(budgets::Column::UpdatedAt, Expr::value(now()))
            .filter(budgets::Column::Id.eq(budget_id.into_inner()))
            .exec(conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// `remaining = amount` for every budget of `user_id`, as one statement.
    /// Idempotent. Returns the number of budget rows reset.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn reset_for_user<C: ConnectionTrait>(
        conn: &C,
        user_id: UserId,
    ) -> RepositoryResult<u64> {
        let result = budgets::Entity::update_many()
            .col_expr(
                budgets::Column::RemainingMinor,
                Expr::col(budgets::Column::AmountMinor).into(),
            )
            .col_expr(budgets::Column::UpdatedAt, Expr::value(now()))
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Inserts the registration default budgets for a new user.
    pub(crate) async fn seed_defaults<C: ConnectionTrait>(
        conn: &C,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Budget>> {
        let mut seeded = Vec::with_capacity(DEFAULT_BUDGETS.len());
        for default in &DEFAULT_BUDGETS {
            let budget = Budget::new(BudgetId::new(), user_id, default.name, default.amount())?;
            seeded.push(insert_budget(conn, &budget).await?.into());
        }
        Ok(seeded)
    }
}

fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

async fn insert_budget<C: ConnectionTrait>(
    conn: &C,
    budget: &Budget,
) -> RepositoryResult<budgets::Model> {
    let amount_minor = to_minor_units(budget.amount)?;
    let now = now();

    let model = budgets::ActiveModel {
        id: Set(budget.id.into_inner()),
        user_id: Set(budget.user_id.into_inner()),
        name: Set(budget.name.clone()),
        amount_minor: Set(amount_minor),
        remaining_minor: Set(amount_minor),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Ok(model.insert(conn).await?)
}

/// Finds a budget owned by `user_id`.
pub(crate) async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    budget_id: BudgetId,
) -> RepositoryResult<budgets::Model> {
    budgets::Entity::find_by_id(budget_id.into_inner())
        .filter(budgets::Column::UserId.eq(user_id.into_inner()))
        .one(conn)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Budget", budget_id))
}
