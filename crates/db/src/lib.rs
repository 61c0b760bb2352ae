//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repositories for profiles, categories, budgets, expenses and recurring templates
//! - The transactional expense reconciler
//! - The daily budget reset job
//! - Database migrations

pub mod entities;
pub mod error;
pub mod migration;
pub mod reconciler;
pub mod repositories;
pub mod reset;

pub use error::{RepositoryError, RepositoryResult};
pub use reconciler::{ExpenseReconciler, ReconcileOutcome};
pub use repositories::{
    BudgetRepository, CategoryRepository, ExpenseRepository, ProfileRepository,
    RecurringRepository,
};
pub use reset::BudgetResetJob;

use std::time::Duration;

use purse_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool using the configured limits.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}
