use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::SchedulerError;

pub const MIN_DIFFICULTY: i64 = 1;
pub const MAX_DIFFICULTY: i64 = 5;

/// Ceiling applied when no explicit cap is configured
pub const DEFAULT_MAX_INTERVAL_DAYS: u32 = 365;

/// Largest ceiling a deployment may configure (100 years)
pub const MAX_INTERVAL_CAP_DAYS: u32 = 36_500;

const SECOND_INTERVAL_DAYS: i64 = 6;
const BASE_EASE: f64 = 2.5;
const EASE_PENALTY_PER_LEVEL: f64 = 0.3;
const MULTIPLIER_STEP: f64 = 0.2;

/// Perceived difficulty on a 1 (easiest) to 5 (hardest) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Difficulty(u8);

impl Difficulty {
  pub const EASIEST: Self = Self(1);
  pub const MEDIUM: Self = Self(3);
  pub const HARDEST: Self = Self(5);

  pub fn new(value: i64) -> Result<Self, SchedulerError> {
    if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&value) {
      Ok(Self(value as u8))
    } else {
      Err(SchedulerError::InvalidDifficulty(value))
    }
  }

  pub fn value(self) -> u8 {
    self.0
  }

  /// Damping factor for a self-rated difficulty: 1 -> 1.0, 5 -> 0.2
  pub fn multiplier(self) -> f64 {
    (MAX_DIFFICULTY + 1 - self.0 as i64) as f64 * MULTIPLIER_STEP
  }
}

impl Default for Difficulty {
  fn default() -> Self {
    Self::MEDIUM
  }
}

impl TryFrom<i64> for Difficulty {
  type Error = SchedulerError;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<Difficulty> for i64 {
  fn from(d: Difficulty) -> Self {
    d.0 as i64
  }
}

/// The slice of a flashcard the scheduler reads.
///
/// Both fields hold the values stored *before* the review being scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewableCard {
  pub difficulty_at_review_time: Difficulty,
  pub correct_streak: u32,
}

impl ReviewableCard {
  /// Build a snapshot from raw stored values, rejecting anything out of contract.
  pub fn new(difficulty: i64, correct_streak: i64) -> Result<Self, SchedulerError> {
    let difficulty_at_review_time = Difficulty::new(difficulty)?;
    let correct_streak = u32::try_from(correct_streak).map_err(|_| {
      SchedulerError::InvalidStreakState {
        field: "correct_streak",
        value: correct_streak,
      }
    })?;

    Ok(Self {
      difficulty_at_review_time,
      correct_streak,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
  pub next_review: DateTime<Utc>,
  pub interval_days: i64,
}

/// Streak-based interval scheduler with a fixed ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewScheduler {
  max_interval_days: u32,
}

impl Default for ReviewScheduler {
  fn default() -> Self {
    Self {
      max_interval_days: DEFAULT_MAX_INTERVAL_DAYS,
    }
  }
}

impl ReviewScheduler {
  pub fn with_max_interval(max_interval_days: i64) -> Result<Self, SchedulerError> {
    if (1..=MAX_INTERVAL_CAP_DAYS as i64).contains(&max_interval_days) {
      Ok(Self {
        max_interval_days: max_interval_days as u32,
      })
    } else {
      Err(SchedulerError::InvalidIntervalCap {
        value: max_interval_days,
        max: MAX_INTERVAL_CAP_DAYS,
      })
    }
  }

  pub fn max_interval_days(&self) -> u32 {
    self.max_interval_days
  }

  /// Compute when a card should next be shown after a review at `now`.
  ///
  /// `updated_difficulty` is the learner's self-rating for this review. It only
  /// damps the interval; the base interval always uses the stored difficulty.
  pub fn compute_next_review(
    &self,
    card: &ReviewableCard,
    correct: bool,
    updated_difficulty: Option<Difficulty>,
    now: DateTime<Utc>,
  ) -> ScheduleResult {
    let base = base_interval(card, correct);
    let multiplier = updated_difficulty.map_or(1.0, Difficulty::multiplier);

    let interval_days = ((base as f64 * multiplier).round() as i64)
      .max(1)
      .min(self.max_interval_days as i64);

    ScheduleResult {
      next_review: now + Duration::days(interval_days),
      interval_days,
    }
  }
}

/// Interval in days before any self-rating adjustment or ceiling.
pub fn base_interval(card: &ReviewableCard, correct: bool) -> i64 {
  if !correct {
    return 1;
  }

  match card.correct_streak {
    0 => 1,
    1 => SECOND_INTERVAL_DAYS,
    streak => {
      let level = card.difficulty_at_review_time.value() as f64 - 1.0;
      let ease = BASE_EASE - level * EASE_PENALTY_PER_LEVEL;
      ((streak as f64 - 1.0) * SECOND_INTERVAL_DAYS as f64 * ease).round() as i64
    }
  }
}
