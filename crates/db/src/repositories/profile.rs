//! Profile repository: registration, profile edits and the pay-day lookup
//! used by the daily reset.

use chrono::Utc;
use purse_core::budget::Budget;
use purse_core::profile::{PROFILE_DEFAULTS, ProfileUpdate};
use purse_core::schedule::PayDay;
use purse_shared::types::UserId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use tracing::info;

use super::{BudgetRepository, CategoryRepository};
use crate::entities::{user_categories, user_profiles};
use crate::error::{RepositoryError, RepositoryResult};

/// Optional registration details.
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

/// Everything created for a new user.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The new profile.
    pub profile: user_profiles::Model,
    /// Default categories.
    pub categories: Vec<user_categories::Model>,
    /// Default budgets, each with `remaining_amount == amount`.
    pub budgets: Vec<Budget>,
}

/// Repository for user profile operations.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the profile, default categories and default budgets for a new
    /// user in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the user already has a profile or the email is
    /// taken, and a validation error for malformed details.
    pub async fn register(
        &self,
        user_id: UserId,
        input: RegisterInput,
    ) -> RepositoryResult<Registration> {
        let details = ProfileUpdate {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            ..ProfileUpdate::default()
        }
        .validate()?;

        let txn = self.db.begin().await?;

        if user_profiles::Entity::find_by_id(user_id.into_inner())
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(RepositoryError::Conflict(format!(
                "Profile already exists for user {user_id}"
            )));
        }

        let now = Utc::now();
        let profile = user_profiles::ActiveModel {
            user_id: Set(user_id.into_inner()),
            first_name: Set(details.first_name.unwrap_or_default()),
            last_name: Set(details.last_name.unwrap_or_default()),
            email: Set(details.email.apply(None)),
            pay_day: Set(Some(PROFILE_DEFAULTS.pay_day.to_string())),
            salary_day: Set(Some(PROFILE_DEFAULTS.salary_day.to_string())),
            desired_budget: Set(Some(PROFILE_DEFAULTS.desired_budget)),
            saving_target: Set(Some(PROFILE_DEFAULTS.saving_target)),
            expected_income: Set(Some(PROFILE_DEFAULTS.expected_income)),
            join_date: Set(now.date_naive()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(unique_to_conflict)?;

        let categories = CategoryRepository::seed_defaults(&txn, user_id).await?;
        let budgets = BudgetRepository::seed_defaults(&txn, user_id).await?;
        txn.commit().await?;

        info!(user_id = %user_id, budgets = budgets.len(), "User registered");
        Ok(Registration {
            profile,
            categories,
            budgets,
        })
    }

    /// Gets the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user has not registered.
    pub async fn get(&self, user_id: UserId) -> RepositoryResult<user_profiles::Model> {
        user_profiles::Entity::find_by_id(user_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Profile", user_id))
    }

    /// Updates profile fields. Names are title-cased, an empty email clears
    /// the address, and day codes must be `01` to `31`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Conflict` for a taken email, or a validation error.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> RepositoryResult<user_profiles::Model> {
        let changes = update.validate()?;
        let current = self.get(user_id).await?;
        let current_email = current.email.clone();

        let mut active: user_profiles::ActiveModel = current.into();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if changes.email.is_change() {
            active.email = Set(changes.email.apply(current_email));
        }
        if let Some(pay_day) = changes.pay_day {
            active.pay_day = Set(Some(pay_day.into()));
        }
        if let Some(salary_day) = changes.salary_day {
            active.salary_day = Set(Some(salary_day.into()));
        }
        if let Some(value) = changes.desired_budget {
            active.desired_budget = Set(Some(value));
        }
        if let Some(value) = changes.saving_target {
            active.saving_target = Set(Some(value));
        }
        if let Some(value) = changes.expected_income {
            active.expected_income = Set(Some(value));
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(unique_to_conflict)
    }

    /// Profiles whose stored `pay_day` equals `pay_day` exactly.
    ///
    /// Unset and unpadded legacy values (`"5"`) never match.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_pay_day(
        &self,
        pay_day: &PayDay,
    ) -> RepositoryResult<Vec<user_profiles::Model>> {
        Ok(user_profiles::Entity::find()
            .filter(user_profiles::Column::PayDay.eq(pay_day.as_str()))
            .order_by_asc(user_profiles::Column::UserId)
            .all(&self.db)
            .await?)
    }
}

fn unique_to_conflict(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            RepositoryError::Conflict("Profile or email address already exists".to_string())
        }
        _ => RepositoryError::Database(err),
    }
}
