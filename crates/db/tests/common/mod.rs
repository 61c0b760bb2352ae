//! Shared setup for repository integration tests.

#![allow(dead_code)]

use purse_db::migration::{Migrator, MigratorTrait};
use purse_db::repositories::{ProfileRepository, RegisterInput, Registration};
use purse_shared::types::UserId;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

/// Fresh in-memory database with the schema applied.
///
/// A single pooled connection: every `sqlite::memory:` connection is its own
/// database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Registers a new user with default categories and budgets.
pub async fn register_user(db: &DatabaseConnection) -> (UserId, Registration) {
    let user_id = UserId::new();
    let registration = ProfileRepository::new(db.clone())
        .register(user_id, RegisterInput::default())
        .await
        .expect("Failed to register user");
    (user_id, registration)
}

/// Makes every UPDATE of a budget with the given name fail.
pub async fn fail_updates_of_budget_named(db: &DatabaseConnection, name: &str) {
    db.execute_unprepared(&format!(
        "CREATE TRIGGER fail_{name} BEFORE UPDATE ON budgets \
         WHEN OLD.name = '{name}' \
         BEGIN SELECT RAISE(ABORT, 'budget {name} is locked'); END;"
    ))
    .await
    .expect("Failed to create trigger");
}
