pub mod error;
pub mod flashcards;
pub mod stats;

use axum::{
  routing::{delete, get, post},
  Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use error::ApiError;
pub use flashcards::{create_flashcard, delete_flashcard, due_flashcards, list_flashcards, submit_review};
pub use stats::{difficulty_recommendation, review_stats};

pub async fn health() -> &'static str {
  "ok"
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/flashcards", get(list_flashcards).post(create_flashcard))
    .route("/api/flashcards/due", get(due_flashcards))
    .route("/api/flashcards/stats", get(review_stats))
    .route("/api/flashcards/difficulty-recommendation", get(difficulty_recommendation))
    .route("/api/flashcards/{id}", delete(delete_flashcard))
    .route("/api/flashcards/{id}/review", post(submit_review))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
