//! Recurring expense and income repository.
//!
//! Both kinds share one shape and one lifecycle; each lives in its own table.

use chrono::NaiveDate;
use purse_core::amount::validate_amount;
use purse_core::recurring::{
    DeletionOutcome, Frequency, RecurringError, RecurringKind, deletion_outcome,
    validate_description, validate_schedule,
};
use purse_shared::types::{CategoryId, RecurringId, UserId};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use tracing::info;

use super::category;
use crate::error::RepositoryResult;

/// Input for creating a recurring template.
#[derive(Debug, Clone)]
pub struct NewRecurring {
    /// Amount per occurrence.
    pub amount: Decimal,
    /// Repeat interval.
    pub frequency: Frequency,
    /// First occurrence.
    pub start_date: NaiveDate,
    /// Last occurrence, if bounded.
    pub end_date: Option<NaiveDate>,
    /// Free-text description.
    pub description: Option<String>,
    /// Category label.
    pub category_id: Option<CategoryId>,
}

/// A stored recurring template of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurringRecord {
    /// Template ID.
    pub id: RecurringId,
    /// Expense or income.
    pub kind: RecurringKind,
    /// Owner.
    pub user_id: UserId,
    /// Amount per occurrence.
    pub amount: Decimal,
    /// Repeat interval.
    pub frequency: Frequency,
    /// First occurrence.
    pub start_date: NaiveDate,
    /// Last occurrence, if bounded.
    pub end_date: Option<NaiveDate>,
    /// Free-text description.
    pub description: Option<String>,
    /// Category label.
    pub category_id: Option<CategoryId>,
    /// Inactive templates are removed by the next delete.
    pub is_active: bool,
}

/// Generates the per-table operations for one recurring entity.
macro_rules! recurring_table {
    ($module:ident, $entity:ident, $kind:expr) => {
        mod $module {
            use chrono::Utc;
            use sea_orm::{
                ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
                QueryOrder, Set,
            };

            use super::{RecurringRecord, Validated};
            use crate::entities::$entity as table;
            use crate::error::{RepositoryError, RepositoryResult};
            use purse_core::recurring::RecurringKind;
            use purse_shared::types::{CategoryId, RecurringId, UserId, from_minor_units};

            const KIND: RecurringKind = $kind;

            fn to_record(model: table::Model) -> RepositoryResult<RecurringRecord> {
                Ok(RecurringRecord {
                    id: model.id.into(),
                    kind: KIND,
                    user_id: model.user_id.into(),
                    amount: from_minor_units(model.amount_minor),
                    frequency: model.frequency.parse()?,
                    start_date: model.start_date,
                    end_date: model.end_date,
                    description: model.description,
                    category_id: model.category_id.map(CategoryId::from),
                    is_active: model.is_active,
                })
            }

            async fn find_owned<C: ConnectionTrait>(
                conn: &C,
                user_id: UserId,
                id: RecurringId,
            ) -> RepositoryResult<table::Model> {
                table::Entity::find_by_id(id.into_inner())
                    .filter(table::Column::UserId.eq(user_id.into_inner()))
                    .one(conn)
                    .await?
                    .ok_or_else(|| RepositoryError::not_found("Recurring record", id))
            }

            pub(super) async fn insert<C: ConnectionTrait>(
                conn: &C,
                user_id: UserId,
                input: Validated,
            ) -> RepositoryResult<RecurringRecord> {
                let now = Utc::now().into();
                let model = table::ActiveModel {
                    id: Set(RecurringId::new().into_inner()),
                    user_id: Set(user_id.into_inner()),
                    amount_minor: Set(input.amount_minor),
                    frequency: Set(input.frequency.code().to_string()),
                    start_date: Set(input.start_date),
                    end_date: Set(input.end_date),
                    description: Set(input.description),
                    category_id: Set(input.category_id.map(CategoryId::into_inner)),
                    is_active: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(conn)
                .await?;
                to_record(model)
            }

            pub(super) async fn get<C: ConnectionTrait>(
                conn: &C,
                user_id: UserId,
                id: RecurringId,
            ) -> RepositoryResult<RecurringRecord> {
                to_record(find_owned(conn, user_id, id).await?)
            }

            pub(super) async fn list<C: ConnectionTrait>(
                conn: &C,
                user_id: UserId,
            ) -> RepositoryResult<Vec<RecurringRecord>> {
                table::Entity::find()
                    .filter(table::Column::UserId.eq(user_id.into_inner()))
                    .order_by_desc(table::Column::StartDate)
                    .all(conn)
                    .await?
                    .into_iter()
                    .map(to_record)
                    .collect()
            }

            pub(super) async fn set_active<C: ConnectionTrait>(
                conn: &C,
                user_id: UserId,
                id: RecurringId,
                is_active: bool,
            ) -> RepositoryResult<RecurringRecord> {
                let mut active: table::ActiveModel = find_owned(conn, user_id, id).await?.into();
                active.is_active = Set(is_active);
                active.updated_at = Set(Utc::now().into());
                to_record(active.update(conn).await?)
            }

            pub(super) async fn remove<C: ConnectionTrait>(
                conn: &C,
                user_id: UserId,
                id: RecurringId,
            ) -> RepositoryResult<()> {
                let model = find_owned(conn, user_id, id).await?;
                table::Entity::delete_by_id(model.id).exec(conn).await?;
                Ok(())
            }
        }
    };
}

recurring_table!(expense_table, recurring_expenses, RecurringKind::Expense);
recurring_table!(income_table, recurring_incomes, RecurringKind::Income);

/// Input after validation, in storage form.
struct Validated {
    amount_minor: i64,
    frequency: Frequency,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    description: Option<String>,
    category_id: Option<CategoryId>,
}

/// Repository for recurring expenses and incomes.
#[derive(Debug, Clone)]
pub struct RecurringRepository {
    db: DatabaseConnection,
}

impl RecurringRepository {
    /// Creates a new recurring repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active template.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad amount, description or date
    /// range, and `NotFound` for a category that is not the caller's.
    pub async fn create(
        &self,
        user_id: UserId,
        kind: RecurringKind,
        input: NewRecurring,
    ) -> RepositoryResult<RecurringRecord> {
        let amount_minor = validate_amount(input.amount).map_err(RecurringError::from)?;
        validate_schedule(input.start_date, input.end_date)?;
        let validated = Validated {
            amount_minor,
            frequency: input.frequency,
            start_date: input.start_date,
            end_date: input.end_date,
            description: validate_description(input.description)?,
            category_id: input.category_id,
        };

        let txn = self.db.begin().await?;
        if let Some(category_id) = validated.category_id {
            category::find_owned(&txn, user_id, category_id).await?;
        }
        let record = match kind {
            RecurringKind::Expense => expense_table::insert(&txn, user_id, validated).await?,
            RecurringKind::Income => income_table::insert(&txn, user_id, validated).await?,
        };
        txn.commit().await?;

        Ok(record)
    }

    /// Gets one of the caller's templates.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the template does not exist or belongs to another user.
    pub async fn get(
        &self,
        user_id: UserId,
        kind: RecurringKind,
        id: RecurringId,
    ) -> RepositoryResult<RecurringRecord> {
        match kind {
            RecurringKind::Expense => expense_table::get(&self.db, user_id, id).await,
            RecurringKind::Income => income_table::get(&self.db, user_id, id).await,
        }
    }

    /// Lists the caller's templates, latest start date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        kind: RecurringKind,
    ) -> RepositoryResult<Vec<RecurringRecord>> {
        match kind {
            RecurringKind::Expense => expense_table::list(&self.db, user_id).await,
            RecurringKind::Income => income_table::list(&self.db, user_id).await,
        }
    }

    /// Reactivates or deactivates a template.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the template does not exist or belongs to another user.
    pub async fn set_active(
        &self,
        user_id: UserId,
        kind: RecurringKind,
        id: RecurringId,
        is_active: bool,
    ) -> RepositoryResult<RecurringRecord> {
        match kind {
            RecurringKind::Expense => {
                expense_table::set_active(&self.db, user_id, id, is_active).await
            }
            RecurringKind::Income => {
                income_table::set_active(&self.db, user_id, id, is_active).await
            }
        }
    }

    /// Deactivates an active template, or removes an inactive one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the template does not exist or belongs to another user.
    pub async fn delete(
        &self,
        user_id: UserId,
        kind: RecurringKind,
        id: RecurringId,
    ) -> RepositoryResult<DeletionOutcome> {
        let txn = self.db.begin().await?;
        let record = match kind {
            RecurringKind::Expense => expense_table::get(&txn, user_id, id).await?,
            RecurringKind::Income => income_table::get(&txn, user_id, id).await?,
        };

        let outcome = deletion_outcome(record.is_active);
        match (outcome, kind) {
            (DeletionOutcome::Deactivated, RecurringKind::Expense) => {
                expense_table::set_active(&txn, user_id, id, false).await?;
            }
            (DeletionOutcome::Deactivated, RecurringKind::Income) => {
                income_table::set_active(&txn, user_id, id, false).await?;
            }
            (DeletionOutcome::Removed, RecurringKind::Expense) => {
                expense_table::remove(&txn, user_id, id).await?;
            }
            (DeletionOutcome::Removed, RecurringKind::Income) => {
                income_table::remove(&txn, user_id, id).await?;
            }
        }
        txn.commit().await?;

        info!(
            recurring_id = %id,
            user_id = %user_id,
            kind = %kind,
            ?outcome,
            "Recurring record deleted"
        );
        Ok(outcome)
    }
}
