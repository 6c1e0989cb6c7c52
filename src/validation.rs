//! Request-boundary validation for card content and performance samples.
//!
//! Scheduling inputs (difficulty, streak) are validated by the `srs` types
//! themselves; this module covers the remaining free-form request fields.

use thiserror::Error;

/// Longest accepted front/back text, in characters
pub const MAX_CARD_TEXT_CHARS: usize = 4000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
  #[error("{0} must not be empty")]
  Empty(&'static str),

  #[error("{field} must be at most {max} characters")]
  TooLong { field: &'static str, max: usize },

  #[error("{field} must be between {min} and {max}, got {value}")]
  OutOfRange {
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
  },
}

/// Trim card text and enforce the length limit.
pub fn card_text(field: &'static str, raw: &str) -> Result<String, ValidationError> {
  let text = raw.trim();
  if text.is_empty() {
    return Err(ValidationError::Empty(field));
  }
  if text.chars().count() > MAX_CARD_TEXT_CHARS {
    return Err(ValidationError::TooLong {
      field,
      max: MAX_CARD_TEXT_CHARS,
    });
  }
  Ok(text.to_string())
}

/// Accuracy must be a percentage and response time a non-negative duration.
pub fn performance_sample(accuracy: f64, response_time_secs: f64) -> Result<(), ValidationError> {
  if !(0.0..=100.0).contains(&accuracy) {
    return Err(ValidationError::OutOfRange {
      field: "accuracy",
      value: accuracy,
      min: 0.0,
      max: 100.0,
    });
  }
  if !response_time_secs.is_finite() || response_time_secs < 0.0 {
    return Err(ValidationError::OutOfRange {
      field: "response_time",
      value: response_time_secs,
      min: 0.0,
      max: f64::MAX,
    });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_card_text_trims() {
    assert_eq!(card_text("front", "  photosynthesis \n").unwrap(), "photosynthesis");
  }

  #[test]
  fn test_card_text_empty() {
    assert_eq!(card_text("back", "   "), Err(ValidationError::Empty("back")));
  }

  #[test]
  fn test_card_text_too_long() {
    let long = "x".repeat(MAX_CARD_TEXT_CHARS + 1);
    assert!(matches!(
      card_text("front", &long),
      Err(ValidationError::TooLong { field: "front", .. })
    ));
    assert!(card_text("front", &"x".repeat(MAX_CARD_TEXT_CHARS)).is_ok());
  }

  #[test]
  fn test_performance_sample() {
    assert!(performance_sample(0.0, 0.0).is_ok());
    assert!(performance_sample(100.0, 12.5).is_ok());
    assert!(performance_sample(100.1, 1.0).is_err());
    assert!(performance_sample(-1.0, 1.0).is_err());
    assert!(performance_sample(f64::NAN, 1.0).is_err());
    assert!(performance_sample(50.0, -0.5).is_err());
    assert!(performance_sample(50.0, f64::INFINITY).is_err());
  }
}
