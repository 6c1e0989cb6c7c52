//! Flashcard and review submission endpoints.

use axum::{
  extract::{
    rejection::{JsonRejection, QueryRejection},
    Path, Query, State,
  },
  http::StatusCode,
  Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::config;
use crate::db;
use crate::domain::Flashcard;
use crate::services;
use crate::srs::Difficulty;
use crate::state::AppState;
use crate::validation;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateFlashcardRequest {
  pub front: String,
  pub back: String,
  #[serde(default)]
  pub file_id: Option<i64>,
  #[serde(default)]
  pub tags: Vec<String>,
  /// 1-5; the configured default when absent
  #[serde(default)]
  pub difficulty: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
  pub correct: bool,
  /// Optional 1-5 self-rating for this review
  #[serde(default)]
  pub difficulty: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DueQuery {
  pub limit: Option<usize>,
}

/// GET /api/flashcards
pub async fn list_flashcards(State(state): State<AppState>) -> Result<Json<Vec<Flashcard>>, ApiError> {
  let conn = db::try_lock(&state.db)?;
  Ok(Json(db::list_flashcards(&conn)?))
}

/// GET /api/flashcards/due
pub async fn due_flashcards(
  State(state): State<AppState>,
  query: Result<Query<DueQuery>, QueryRejection>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
  let Query(query) = query?;
  let limit = query
    .limit
    .unwrap_or(config::DEFAULT_DUE_LIMIT)
    .clamp(1, config::MAX_DUE_LIMIT);

  let conn = db::try_lock(&state.db)?;
  Ok(Json(db::get_due_flashcards(&conn, Utc::now(), limit)?))
}

/// POST /api/flashcards
pub async fn create_flashcard(
  State(state): State<AppState>,
  payload: Result<Json<CreateFlashcardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Flashcard>), ApiError> {
  let Json(request) = payload?;

  let front = validation::card_text("front", &request.front)?;
  let back = validation::card_text("back", &request.back)?;
  let difficulty = match request.difficulty {
    Some(level) => Difficulty::new(level)?,
    None => state.default_difficulty,
  };

  let card = Flashcard::new(front, back, request.file_id, &request.tags, difficulty, Utc::now());

  let conn = db::try_lock(&state.db)?;
  let id = db::insert_flashcard(&conn, &card)?;
  // Respond with the stored row; timestamps are persisted at microsecond precision
  let created = db::get_flashcard_by_id(&conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
  tracing::debug!(card_id = id, "Flashcard created");

  Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/flashcards/{id}/review
pub async fn submit_review(
  State(state): State<AppState>,
  Path(id): Path<i64>,
  payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<Flashcard>, ApiError> {
  let Json(request) = payload?;

  let mut conn = db::try_lock(&state.db)?;
  let card = services::submit_review(
    &mut conn,
    &state.scheduler,
    id,
    request.correct,
    request.difficulty,
    Utc::now(),
  )?;

  Ok(Json(card))
}

/// DELETE /api/flashcards/{id}
pub async fn delete_flashcard(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  let conn = db::try_lock(&state.db)?;
  if db::delete_flashcard(&conn, id)? {
    tracing::debug!(card_id = id, "Flashcard deleted");
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::not_found(id))
  }
}
