use axum::{
  extract::{Path, State},
  http::StatusCode,
  Json,
};
use serde::Serialize;

use super::{ApiError, ApiResult};
use crate::domain::SoundCue;
use crate::quiz::{StudyCard, StudyDeck};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StudyView {
  pub id: String,
  pub card: Option<StudyCard>,
  /// Sounds to play for this response (flipping a card pops)
  pub cues: Vec<SoundCue>,
}

impl StudyView {
  fn shown(id: String, card: Option<StudyCard>) -> Self {
    Self { id, card, cues: Vec::new() }
  }

  fn flipped(id: String, card: Option<StudyCard>) -> Self {
    Self { id, card, cues: vec![SoundCue::Pop] }
  }
}

fn with_deck<R>(state: &AppState, id: &str, f: impl FnOnce(&mut StudyDeck) -> R) -> ApiResult<R> {
  state.decks.with(id, f).ok_or(ApiError::NotFound("Study deck"))
}

/// POST /api/study
pub async fn start_study(State(state): State<AppState>) -> (StatusCode, Json<StudyView>) {
  let deck = StudyDeck::shuffled(&mut rand::rng());
  let card = deck.current();
  let id = state.decks.insert(deck);
  tracing::debug!(deck = %id, "Started study deck");

  (StatusCode::CREATED, Json(StudyView::shown(id, card)))
}

/// GET /api/study/{id}
pub async fn current_card(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<StudyView>> {
  let card = with_deck(&state, &id, |deck| deck.current())?;
  Ok(Json(StudyView::shown(id, card)))
}

/// POST /api/study/{id}/next
pub async fn next_card(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<StudyView>> {
  let card = with_deck(&state, &id, |deck| deck.next())?;
  Ok(Json(StudyView::flipped(id, card)))
}

/// POST /api/study/{id}/prev
pub async fn prev_card(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<StudyView>> {
  let card = with_deck(&state, &id, |deck| deck.prev())?;
  Ok(Json(StudyView::flipped(id, card)))
}
