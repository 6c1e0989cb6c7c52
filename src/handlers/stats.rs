use axum::{
  extract::{rejection::QueryRejection, Query, State},
  Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::{self, ReviewStatistics};
use crate::srs::{self, Difficulty};
use crate::state::AppState;
use crate::validation;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
  /// Recent accuracy, 0-100
  pub accuracy: f64,
  /// Average response time in seconds
  pub response_time: f64,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
  pub difficulty: Difficulty,
}

/// GET /api/flashcards/stats
pub async fn review_stats(State(state): State<AppState>) -> Result<Json<ReviewStatistics>, ApiError> {
  let conn = db::try_lock(&state.db)?;
  Ok(Json(db::get_review_statistics(&conn, Utc::now())?))
}

/// GET /api/flashcards/difficulty-recommendation
pub async fn difficulty_recommendation(
  query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
  let Query(query) = query?;
  validation::performance_sample(query.accuracy, query.response_time)?;

  Ok(Json(RecommendationResponse {
    difficulty: srs::recommend_difficulty(query.accuracy, query.response_time),
  }))
}
