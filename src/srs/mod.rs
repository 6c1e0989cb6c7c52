pub mod error;
pub mod recommend;
pub mod scheduler;

pub use error::SchedulerError;
pub use recommend::recommend_difficulty;
pub use scheduler::{
  base_interval, Difficulty, ReviewScheduler, ReviewableCard, ScheduleResult,
  DEFAULT_MAX_INTERVAL_DAYS, MAX_INTERVAL_CAP_DAYS,
};
