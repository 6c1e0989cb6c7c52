//! Application state shared by all handlers.

use crate::config::Config;
use crate::db::DbPool;
use crate::srs::{Difficulty, ReviewScheduler};

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub scheduler: ReviewScheduler,
    /// Difficulty assigned to new cards that don't specify one
    pub default_difficulty: Difficulty,
}

impl AppState {
    pub fn new(db: DbPool, scheduler: ReviewScheduler, default_difficulty: Difficulty) -> Self {
        Self {
            db,
            scheduler,
            default_difficulty,
        }
    }

    pub fn from_config(db: DbPool, config: &Config) -> Self {
        Self::new(db, config.scheduler, config.default_difficulty)
    }
}
