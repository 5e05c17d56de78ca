//! Player identity, lifetime stats and sound settings.

use axum::{
  extract::{Query, State},
  Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult};
use crate::config;
use crate::db::{self, try_lock, GameRecord, SoundSettings, Stats};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserView {
  pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
  pub name: String,
}

/// GET /api/user
pub async fn get_user(State(state): State<AppState>) -> ApiResult<Json<UserView>> {
  let conn = try_lock(&state.db)?;
  let name = db::get_user_name(&conn)?;
  Ok(Json(UserView { name }))
}

/// PUT /api/user
pub async fn update_user(
  State(state): State<AppState>,
  Json(request): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserView>> {
  let conn = try_lock(&state.db)?;
  let name = db::set_user_name(&conn, &request.name)?
    .ok_or_else(|| ApiError::BadRequest("Name cannot be empty".to_string()))?;
  tracing::info!("Display name updated");
  Ok(Json(UserView { name: Some(name) }))
}

#[derive(Debug, Serialize)]
pub struct StatsView {
  #[serde(flatten)]
  pub stats: Stats,
  pub accuracy: u32,
}

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsView>> {
  let conn = try_lock(&state.db)?;
  let stats = db::get_stats(&conn)?;
  Ok(Json(StatsView {
    accuracy: stats.accuracy(),
    stats,
  }))
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
  pub limit: Option<i64>,
}

/// GET /api/stats/history?limit=N
pub async fn game_history(
  State(state): State<AppState>,
  Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<GameRecord>>> {
  let limit = query
    .limit
    .unwrap_or(config::DEFAULT_HISTORY_LIMIT)
    .clamp(1, config::MAX_HISTORY_LIMIT);
  let conn = try_lock(&state.db)?;
  Ok(Json(db::recent_games(&conn, limit)?))
}

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<SoundSettings>> {
  let conn = try_lock(&state.db)?;
  Ok(Json(db::get_sound_settings(&conn)?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
  pub muted: Option<bool>,
  pub speech_rate: Option<f64>,
}

/// PUT /api/settings
pub async fn update_settings(
  State(state): State<AppState>,
  Json(request): Json<UpdateSettingsRequest>,
) -> ApiResult<Json<SoundSettings>> {
  let conn = try_lock(&state.db)?;
  if let Some(muted) = request.muted {
    db::set_muted(&conn, muted)?;
  }
  if let Some(rate) = request.speech_rate {
    db::set_speech_rate(&conn, rate)?;
  }
  Ok(Json(db::get_sound_settings(&conn)?))
}
