//! Application configuration.
//!
//! Values are read with priority: config.toml > .env / environment > defaults.
//! Invalid values are logged and replaced by their defaults rather than
//! aborting startup.

use serde::Deserialize;
use std::path::PathBuf;

use crate::srs::{Difficulty, ReviewScheduler, DEFAULT_MAX_INTERVAL_DAYS};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_DATABASE_PATH: &str = "data/studydesk.db";

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

// ==================== Query Limits ====================

/// Default limit for due card queries
pub const DEFAULT_DUE_LIMIT: usize = 50;

/// Hard upper bound a client may request
pub const MAX_DUE_LIMIT: usize = 500;

// ==================== Reminders ====================

/// Minutes between due-card reminder checks (0 disables)
pub const DEFAULT_REMINDER_INTERVAL_MINUTES: u64 = 60;

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<DatabaseSection>,
    server: Option<ServerSection>,
    scheduler: Option<SchedulerSection>,
    reminders: Option<RemindersSection>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct SchedulerSection {
    max_interval_days: Option<i64>,
    default_difficulty: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RemindersSection {
    interval_minutes: Option<u64>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub server_addr: String,
    pub server_port: u16,
    pub scheduler: ReviewScheduler,
    /// Difficulty given to newly created cards when the request has none
    pub default_difficulty: Difficulty,
    pub reminder_interval_minutes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            server_addr: SERVER_ADDR.to_string(),
            server_port: SERVER_PORT,
            scheduler: ReviewScheduler::default(),
            default_difficulty: Difficulty::MEDIUM,
            reminder_interval_minutes: DEFAULT_REMINDER_INTERVAL_MINUTES,
        }
    }
}

impl Config {
    /// Load from config.toml and the process environment
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let contents = std::fs::read_to_string(CONFIG_FILE).ok();
        Self::from_sources(
            contents.as_deref(),
            std::env::var("DATABASE_PATH").ok(),
            std::env::var("PORT").ok(),
        )
    }

    /// Resolve configuration from explicit sources
    pub fn from_sources(
        toml_contents: Option<&str>,
        database_path_env: Option<String>,
        port_env: Option<String>,
    ) -> Self {
        let file = match toml_contents.map(toml::from_str::<FileConfig>) {
            Some(Ok(file)) => file,
            Some(Err(e)) => {
                tracing::warn!("Ignoring malformed {}: {}", CONFIG_FILE, e);
                FileConfig::default()
            }
            None => FileConfig::default(),
        };

        let mut config = Config::default();

        // Priority 1: config.toml, Priority 2: environment
        let file_db_path = file.database.and_then(|db| db.path);
        if let Some(path) = file_db_path {
            tracing::info!("Using database from {}: {}", CONFIG_FILE, path);
            config.database_path = PathBuf::from(path);
        } else if let Some(path) = database_path_env {
            tracing::info!("Using database from DATABASE_PATH env: {}", path);
            config.database_path = PathBuf::from(path);
        } else {
            tracing::info!("Using default database path: {}", config.database_path.display());
        }

        let server = file.server;
        if let Some(addr) = server.as_ref().and_then(|s| s.addr.clone()) {
            config.server_addr = addr;
        }
        if let Some(port) = server.as_ref().and_then(|s| s.port) {
            config.server_port = port;
        } else if let Some(raw) = port_env {
            match raw.parse::<u16>() {
                Ok(port) => config.server_port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", raw),
            }
        }

        if let Some(scheduler) = file.scheduler {
            if let Some(days) = scheduler.max_interval_days {
                match ReviewScheduler::with_max_interval(days) {
                    Ok(s) => config.scheduler = s,
                    Err(e) => tracing::warn!(
                        "Ignoring scheduler.max_interval_days ({}), using {}",
                        e,
                        DEFAULT_MAX_INTERVAL_DAYS
                    ),
                }
            }
            if let Some(level) = scheduler.default_difficulty {
                match Difficulty::new(level) {
                    Ok(d) => config.default_difficulty = d,
                    Err(e) => tracing::warn!("Ignoring scheduler.default_difficulty ({})", e),
                }
            }
        }

        if let Some(minutes) = file.reminders.and_then(|r| r.interval_minutes) {
            config.reminder_interval_minutes = minutes;
        }

        config
    }

    /// Get the full server bind address
    pub fn server_bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }
}
