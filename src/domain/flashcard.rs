use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::srs::{Difficulty, ReviewableCard, SchedulerError};

/// Maximum number of tags kept on a card
pub const MAX_TAGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
  pub id: i64,
  /// Source document this card was generated from, if any
  pub file_id: Option<i64>,
  pub front: String,
  pub back: String,
  /// 1 (easiest) to 5 (hardest). Stored raw; validated when a snapshot is taken.
  pub difficulty: i64,
  pub next_review: DateTime<Utc>,
  pub review_count: i64,
  pub correct_streak: i64,
  pub tags: Vec<String>,
  pub created_at: DateTime<Utc>,
}

impl Flashcard {
  /// A freshly generated card, due immediately.
  pub fn new(
    front: String,
    back: String,
    file_id: Option<i64>,
    tags: &[String],
    difficulty: Difficulty,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      id: 0,
      file_id,
      front,
      back,
      difficulty: difficulty.into(),
      next_review: now,
      review_count: 0,
      correct_streak: 0,
      tags: normalize_tags(tags),
      created_at: now,
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review <= now
  }

  /// The pre-review state handed to the scheduler.
  pub fn snapshot(&self) -> Result<ReviewableCard, SchedulerError> {
    if self.review_count < 0 {
      return Err(SchedulerError::InvalidStreakState {
        field: "review_count",
        value: self.review_count,
      });
    }
    ReviewableCard::new(self.difficulty, self.correct_streak)
  }
}

/// Normalize free-form tags: lowercase, word characters only, first two words
/// joined with `_`. Empty and duplicate tags are dropped.
pub fn normalize_tags(raw: &[String]) -> Vec<String> {
  let mut tags: Vec<String> = Vec::new();
  for tag in raw.iter().filter_map(|t| normalize_tag(t)) {
    if !tags.contains(&tag) {
      tags.push(tag);
    }
    if tags.len() == MAX_TAGS {
      break;
    }
  }
  tags
}

fn normalize_tag(raw: &str) -> Option<String> {
  let cleaned: String = raw
    .to_lowercase()
    .chars()
    .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
    .collect();

  let tag = cleaned.split_whitespace().take(2).collect::<Vec<_>>().join("_");
  if tag.is_empty() { None } else { Some(tag) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
  }

  fn tags(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_new_card_defaults() {
    let card = Flashcard::new(
      "Mitochondria".to_string(),
      "Powerhouse of the cell".to_string(),
      Some(7),
      &tags(&["Cell Biology"]),
      Difficulty::MEDIUM,
      now(),
    );

    assert_eq!(card.id, 0);
    assert_eq!(card.file_id, Some(7));
    assert_eq!(card.difficulty, 3);
    assert_eq!(card.review_count, 0);
    assert_eq!(card.correct_streak, 0);
    assert_eq!(card.next_review, now());
    assert_eq!(card.tags, vec!["cell_biology".to_string()]);
    assert!(card.is_due(now()));
  }

  #[test]
  fn test_is_due_boundary() {
    let mut card = Flashcard::new("q".into(), "a".into(), None, &[], Difficulty::MEDIUM, now());
    card.next_review = now() + Duration::seconds(1);
    assert!(!card.is_due(now()));
    assert!(card.is_due(now() + Duration::seconds(1)));
  }

  #[test]
  fn test_snapshot_carries_pre_review_state() {
    let mut card = Flashcard::new("q".into(), "a".into(), None, &[], Difficulty::HARDEST, now());
    card.correct_streak = 4;
    let snap = card.snapshot().unwrap();
    assert_eq!(snap.correct_streak, 4);
    assert_eq!(snap.difficulty_at_review_time, Difficulty::HARDEST);
  }

  #[test]
  fn test_snapshot_rejects_negative_review_count() {
    let mut card = Flashcard::new("q".into(), "a".into(), None, &[], Difficulty::MEDIUM, now());
    card.review_count = -2;
    assert_eq!(
      card.snapshot(),
      Err(SchedulerError::InvalidStreakState {
        field: "review_count",
        value: -2
      })
    );
  }

  #[test]
  fn test_snapshot_rejects_corrupt_difficulty() {
    let mut card = Flashcard::new("q".into(), "a".into(), None, &[], Difficulty::MEDIUM, now());
    card.difficulty = 0;
    assert_eq!(card.snapshot(), Err(SchedulerError::InvalidDifficulty(0)));
  }

  #[test]
  fn test_normalize_tag_strips_punctuation_and_truncates() {
    assert_eq!(
      normalize_tags(&tags(&["The Krebs cycle, explained!"])),
      vec!["the_krebs".to_string()]
    );
  }

  #[test]
  fn test_normalize_tags_drops_empty_and_duplicates() {
    assert_eq!(
      normalize_tags(&tags(&["", "!!!", "Physics", "physics", "  "])),
      vec!["physics".to_string()]
    );
  }

  #[test]
  fn test_normalize_tags_limit() {
    let raw = tags(&["a", "b", "c", "d", "e", "f", "g"]);
    assert_eq!(normalize_tags(&raw).len(), MAX_TAGS);
  }
}
