use super::scheduler::Difficulty;

/// (minimum accuracy %, maximum response seconds, suggested difficulty)
const PERFORMANCE_BANDS: [(f64, f64, u8); 4] = [
  (90.0, 5.0, 1),
  (80.0, 10.0, 2),
  (60.0, 20.0, 3),
  (40.0, 30.0, 4),
];

/// Suggest a self-rating from recent performance on a card.
///
/// Fast, accurate recall maps to the easy end of the scale. Anything below
/// every band is rated hardest. Inputs are expected to be validated already
/// (see `validation::performance_sample`).
pub fn recommend_difficulty(accuracy_percent: f64, response_time_secs: f64) -> Difficulty {
  PERFORMANCE_BANDS
    .iter()
    .find(|(min_accuracy, max_secs, _)| {
      accuracy_percent >= *min_accuracy && response_time_secs <= *max_secs
    })
    .and_then(|(_, _, level)| Difficulty::new(*level as i64).ok())
    .unwrap_or(Difficulty::HARDEST)
}
