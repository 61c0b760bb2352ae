//! Category repository.

use chrono::Utc;
use purse_core::category::{DEFAULT_CATEGORIES, validate_category_name};
use purse_shared::types::{CategoryId, UserId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{expenses, recurring_expenses, recurring_incomes, user_categories};
use crate::error::{RepositoryError, RepositoryResult};

/// Repository for user category operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or overlong name.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &str,
    ) -> RepositoryResult<user_categories::Model> {
        let name = validate_category_name(name)?;
        insert_category(&self.db, user_id, name).await
    }

    /// Lists the caller's categories by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<user_categories::Model>> {
        Ok(user_categories::Entity::find()
            .filter(user_categories::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(user_categories::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a validation error.
    pub async fn rename(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        name: &str,
    ) -> RepositoryResult<user_categories::Model> {
        let name = validate_category_name(name)?;
        let current = find_owned(&self.db, user_id, category_id).await?;

        let mut active: user_categories::ActiveModel = current.into();
        active.name = Set(name);
        Ok(active.update(&self.db).await?)
    }

    /// Deletes a category, clearing it from the caller's expenses and
    /// recurring templates first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category does not exist or belongs to another user.
    pub async fn delete(&self, user_id: UserId, category_id: CategoryId) -> RepositoryResult<()> {
        let txn = self.db.begin().await?;
        let category = find_owned(&txn, user_id, category_id).await?;
        let none = Option::<Uuid>::None;

        let expenses_cleared = expenses::Entity::update_many()
            .col_expr(expenses::Column::CategoryId, Expr::value(none))
            .filter(expenses::Column::CategoryId.eq(category.id))
            .exec(&txn)
            .await?
            .rows_affected;

        recurring_expenses::Entity::update_many()
            .col_expr(recurring_expenses::Column::CategoryId, Expr::value(none))
            .filter(recurring_expenses::Column::CategoryId.eq(category.id))
            .exec(&txn)
            .await?;

        recurring_incomes::Entity::update_many()
            .col_expr(recurring_incomes::Column::CategoryId, Expr::value(none))
            .filter(recurring_incomes::Column::CategoryId.eq(category.id))
            .exec(&txn)
            .await?;

        user_categories::Entity::delete_by_id(category.id)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        info!(category_id = %category.id, user_id = %user_id, expenses_cleared, "Category deleted");
        Ok(())
    }

    /// Inserts the registration default categories for a new user.
    pub(crate) async fn seed_defaults<C: ConnectionTrait>(
        conn: &C,
        user_id: UserId,
    ) -> RepositoryResult<Vec<user_categories::Model>> {
        let mut seeded = Vec::with_capacity(DEFAULT_CATEGORIES.len());
        for name in DEFAULT_CATEGORIES {
            seeded.push(insert_category(conn, user_id, name.to_string()).await?);
        }
        Ok(seeded)
    }
}

async fn insert_category<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    name: String,
) -> RepositoryResult<user_categories::Model> {
    let model = user_categories::ActiveModel {
        id: Set(CategoryId::new().into_inner()),
        user_id: Set(user_id.into_inner()),
        name: Set(name),
        created_at: Set(Utc::now().into()),
    };
    Ok(model.insert(conn).await?)
}

/// Finds a category owned by `user_id`.
pub(crate) async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    category_id: CategoryId,
) -> RepositoryResult<user_categories::Model> {
    user_categories::Entity::find_by_id(category_id.into_inner())
        .filter(user_categories::Column::UserId.eq(user_id.into_inner()))
        .one(conn)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Category", category_id))
}
