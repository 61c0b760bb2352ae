//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Budget reset scheduler configuration.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Run pending migrations when the worker starts.
    #[serde(default)]
    pub migrate_on_start: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Budget reset scheduler configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the worker starts the daily reset timer.
    #[serde(default = "default_scheduler_enabled")]
    pub enabled: bool,
    /// Fixed offset from UTC, in seconds, used to decide "today".
    ///
    /// This is a fixed offset, not a named zone: it does not follow
    /// daylight-saving transitions.
    #[serde(default = "default_utc_offset_seconds")]
    pub utc_offset_seconds: i32,
    /// Local wall time (`HH:MM`) at which the daily run fires.
    #[serde(default = "default_run_at")]
    pub run_at: String,
}

fn default_scheduler_enabled() -> bool {
    true
}

fn default_utc_offset_seconds() -> i32 {
    7200 // UTC+2
}

fn default_run_at() -> String {
    "00:00".to_string()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_scheduler_enabled(),
            utc_offset_seconds: default_utc_offset_seconds(),
            run_at: default_run_at(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "purse_worker=info,purse_db=info,purse_jobs=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PURSE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
