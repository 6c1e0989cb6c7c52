use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::srs::{Difficulty, ScheduleResult, SchedulerError};

use super::flashcard::Flashcard;

/// The write-back computed from one review: what the caller persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewCommit {
  pub next_review: DateTime<Utc>,
  pub interval_days: i64,
  pub review_count: i64,
  pub correct_streak: i64,
  pub difficulty: i64,
}

impl ReviewCommit {
  /// Success extends the streak, failure resets it. The self-rating replaces the
  /// stored difficulty only when one was given.
  ///
  /// Counters already at their ceiling are rejected rather than wrapped.
  pub fn from_outcome(
    card: &Flashcard,
    correct: bool,
    updated_difficulty: Option<Difficulty>,
    schedule: &ScheduleResult,
  ) -> Result<Self, SchedulerError> {
    let review_count = increment(card.review_count, "review_count")?;
    let correct_streak = if correct {
      increment(card.correct_streak, "correct_streak")?
    } else {
      0
    };

    Ok(Self {
      next_review: schedule.next_review,
      interval_days: schedule.interval_days,
      review_count,
      correct_streak,
      difficulty: updated_difficulty.map_or(card.difficulty, i64::from),
    })
  }
}

fn increment(value: i64, field: &'static str) -> Result<i64, SchedulerError> {
  value
    .checked_add(1)
    .ok_or(SchedulerError::InvalidStreakState { field, value })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLog {
  pub id: i64,
  pub card_id: i64,
  pub correct: bool,
  pub difficulty_before: i64,
  pub difficulty_override: Option<i64>,
  pub streak_before: i64,
  pub interval_days: i64,
  pub reviewed_at: DateTime<Utc>,
}

impl ReviewLog {
  pub fn new(
    card: &Flashcard,
    correct: bool,
    difficulty_override: Option<Difficulty>,
    interval_days: i64,
    reviewed_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id: 0,
      card_id: card.id,
      correct,
      difficulty_before: card.difficulty,
      difficulty_override: difficulty_override.map(i64::from),
      streak_before: card.correct_streak,
      interval_days,
      reviewed_at,
    }
  }
}
