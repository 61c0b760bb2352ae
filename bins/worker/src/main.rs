//! Purse worker
//!
//! Connects to the database, optionally applies migrations, and runs the
//! daily budget reset scheduler until interrupted.

use std::sync::Arc;

use anyhow::Context;
use purse_db::BudgetResetJob;
use purse_db::migration::Migrator;
use purse_jobs::{ResetScheduler, clock_from_config};
use purse_shared::AppConfig;
use purse_shared::config::LoggingConfig;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let db = purse_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    if config.database.migrate_on_start {
        Migrator::up(&db, None)
            .await
            .context("Failed to apply migrations")?;
        info!("Migrations applied");
    }

    let scheduler = if config.scheduler.enabled {
        let clock = clock_from_config(&config.scheduler).context("Invalid scheduler settings")?;
        let job = Arc::new(BudgetResetJob::new(db.clone()));
        Some(ResetScheduler::start(job, clock))
    } else {
        info!("Budget reset scheduler disabled");
        None
    };

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown requested");

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }
    db.close().await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.level.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
