//! JSON API.
//!
//! Every endpoint lives under `/api`. Failures are answered with
//! `{"error": "..."}` and a matching status code.

pub mod hint;
pub mod profile;
pub mod quiz;
pub mod study;
pub mod verbs;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post, put},
  Json, Router,
};
use serde_json::json;

use crate::db::DbLockError;
use crate::quiz::QuizError;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),
  #[error("{0} not found")]
  NotFound(&'static str),
  #[error("{0}")]
  Conflict(String),
  #[error(transparent)]
  DbLock(#[from] DbLockError),
  #[error("Database error")]
  Database(#[from] rusqlite::Error),
}

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Conflict(_) => StatusCode::CONFLICT,
      Self::DbLock(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<QuizError> for ApiError {
  fn from(e: QuizError) -> Self {
    match e {
      QuizError::EmptyQuiz | QuizError::NoVerbs(_) | QuizError::IndexOutOfRange { .. } => {
        Self::BadRequest(e.to_string())
      }
      QuizError::WrongMode(_) | QuizError::AlreadyFinished | QuizError::NotFinished => {
        Self::Conflict(e.to_string())
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if let Self::Database(e) = &self {
      tracing::error!("Database error: {}", e);
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
  Json(json!({ "status": "ok" }))
}

/// All routes, bound to the shared state
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/health", get(health))
    .route("/api/verbs", get(verbs::list_verbs))
    .route("/api/verbs/summary", get(verbs::verb_summary))
    .route("/api/verbs/{base}", get(verbs::get_verb))
    .route("/api/quiz", post(quiz::start_quiz))
    .route("/api/quiz/{id}", get(quiz::get_quiz))
    .route("/api/quiz/{id}/answers/{index}", put(quiz::record_answer))
    .route("/api/quiz/{id}/check/{index}", post(quiz::check_answer))
    .route("/api/quiz/{id}/navigate", post(quiz::navigate))
    .route("/api/quiz/{id}/finish", post(quiz::finish_quiz))
    .route("/api/quiz/{id}/review", post(quiz::start_review))
    .route("/api/quiz/{id}/palette", get(quiz::palette))
    .route("/api/study", post(study::start_study))
    .route("/api/study/{id}", get(study::current_card))
    .route("/api/study/{id}/next", post(study::next_card))
    .route("/api/study/{id}/prev", post(study::prev_card))
    .route("/api/hint", post(hint::request_hint))
    .route("/api/user", get(profile::get_user).put(profile::update_user))
    .route("/api/stats", get(profile::get_stats))
    .route("/api/stats/history", get(profile::game_history))
    .route("/api/settings", get(profile::get_settings).put(profile::update_settings))
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_quiz_errors_map_to_status() {
    assert_eq!(ApiError::from(QuizError::EmptyQuiz).status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      ApiError::from(QuizError::IndexOutOfRange { index: 9, len: 3 }).status(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(ApiError::from(QuizError::AlreadyFinished).status(), StatusCode::CONFLICT);
    assert_eq!(ApiError::from(QuizError::NotFinished).status(), StatusCode::CONFLICT);
    assert_eq!(ApiError::NotFound("Quiz").to_string(), "Quiz not found");
    assert_eq!(ApiError::from(DbLockError).status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
