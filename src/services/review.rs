//! Review submission: look up, schedule, commit.
//!
//! The scheduler only computes; everything that touches storage for a review
//! happens here inside a single transaction.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use thiserror::Error;

use crate::db;
use crate::domain::{Flashcard, ReviewCommit, ReviewLog};
use crate::srs::{Difficulty, ReviewScheduler, SchedulerError};

#[derive(Debug, Error)]
pub enum ReviewError {
  #[error("Flashcard not found: {0}")]
  NotFound(i64),

  #[error(transparent)]
  Invalid(#[from] SchedulerError),

  #[error("Database operation failed: {0}")]
  Database(#[from] rusqlite::Error),
}

/// Record one review of `card_id` made at `now` and return the card as stored.
///
/// `difficulty_override` is the learner's optional 1-5 self-rating. It is
/// validated before the card is read, so a bad rating never touches storage.
pub fn submit_review(
  conn: &mut Connection,
  scheduler: &ReviewScheduler,
  card_id: i64,
  correct: bool,
  difficulty_override: Option<i64>,
  now: DateTime<Utc>,
) -> Result<Flashcard, ReviewError> {
  let updated_difficulty = difficulty_override.map(Difficulty::new).transpose()?;

  let tx = conn.transaction()?;

  let card = db::get_flashcard_by_id(&tx, card_id)?.ok_or(ReviewError::NotFound(card_id))?;
  let snapshot = card.snapshot()?;
  let schedule = scheduler.compute_next_review(&snapshot, correct, updated_difficulty, now);
  let commit = ReviewCommit::from_outcome(&card, correct, updated_difficulty, &schedule)?;

  db::update_flashcard_after_review(&tx, card.id, &commit)?;
  db::insert_review_log(
    &tx,
    &ReviewLog::new(&card, correct, updated_difficulty, schedule.interval_days, now),
  )?;
  let updated = db::get_flashcard_by_id(&tx, card_id)?.ok_or(ReviewError::NotFound(card_id))?;
  tx.commit()?;

  tracing::debug!(
    card_id,
    correct,
    interval_days = schedule.interval_days,
    streak = commit.correct_streak,
    "Review recorded"
  );

  Ok(updated)
}
