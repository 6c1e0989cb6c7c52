use thiserror::Error;

/// Rejections raised at the scheduler boundary.
///
/// The interval arithmetic itself is total; these only fire when a caller
/// hands over a snapshot or override that breaks the card invariants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
  #[error("difficulty must be between 1 and 5, got {0}")]
  InvalidDifficulty(i64),

  #[error("{field} is outside the supported range, got {value}")]
  InvalidStreakState { field: &'static str, value: i64 },

  #[error("maximum interval must be between 1 and {max} days, got {value}")]
  InvalidIntervalCap { value: i64, max: u32 },
}
