//! JSON error responses for the API.

use axum::{
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::db::DbLockError;
use crate::services::ReviewError;
use crate::srs::SchedulerError;
use crate::validation::ValidationError;

#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  /// Machine-readable error code
  pub code: &'static str,
  /// User-facing error message
  pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
  message: &'a str,
  code: &'a str,
}

impl ApiError {
  pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
    Self {
      status,
      code,
      message: message.into(),
    }
  }

  pub fn not_found(id: i64) -> Self {
    Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", format!("Flashcard not found: {}", id))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let body = ErrorBody {
      message: &self.message,
      code: self.code,
    };
    (self.status, Json(body)).into_response()
  }
}

impl From<SchedulerError> for ApiError {
  fn from(err: SchedulerError) -> Self {
    let code = match err {
      SchedulerError::InvalidDifficulty(_) => "INVALID_DIFFICULTY",
      SchedulerError::InvalidStreakState { .. } => "INVALID_STREAK_STATE",
      SchedulerError::InvalidIntervalCap { .. } => "INVALID_INPUT",
    };
    Self::new(StatusCode::UNPROCESSABLE_ENTITY, code, err.to_string())
  }
}

impl From<ValidationError> for ApiError {
  fn from(err: ValidationError) -> Self {
    Self::new(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INPUT", err.to_string())
  }
}

impl From<rusqlite::Error> for ApiError {
  fn from(err: rusqlite::Error) -> Self {
    tracing::error!("Database error: {}", err);
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR", "Database error")
  }
}

impl From<DbLockError> for ApiError {
  fn from(err: DbLockError) -> Self {
    Self::new(StatusCode::SERVICE_UNAVAILABLE, "DB_UNAVAILABLE", err.to_string())
  }
}

impl From<ReviewError> for ApiError {
  fn from(err: ReviewError) -> Self {
    match err {
      ReviewError::NotFound(id) => Self::not_found(id),
      ReviewError::Invalid(e) => e.into(),
      ReviewError::Database(e) => e.into(),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::new(rejection.status(), "INVALID_INPUT", rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    Self::new(rejection.status(), "INVALID_INPUT", rejection.body_text())
  }
}
