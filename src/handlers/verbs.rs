use axum::{
  extract::{Path, Query},
  Json,
};
use serde::Deserialize;

use super::{ApiError, ApiResult};
use crate::content::{self, DifficultyCounts};
use crate::domain::{DifficultyFilter, Verb};

#[derive(Debug, Default, Deserialize)]
pub struct VerbQuery {
  pub difficulty: Option<String>,
}

/// GET /api/verbs?difficulty=all|common|advanced
pub async fn list_verbs(Query(query): Query<VerbQuery>) -> ApiResult<Json<Vec<Verb>>> {
  let filter = match query.difficulty.as_deref() {
    None | Some("") => DifficultyFilter::All,
    Some(value) => DifficultyFilter::from_str(value)
      .ok_or_else(|| ApiError::BadRequest(format!("Unknown difficulty '{}'", value)))?,
  };
  Ok(Json(content::verbs_for(filter)))
}

/// GET /api/verbs/summary
pub async fn verb_summary() -> Json<DifficultyCounts> {
  Json(content::difficulty_counts())
}

/// GET /api/verbs/{base}
pub async fn get_verb(Path(base): Path<String>) -> ApiResult<Json<Verb>> {
  content::find_verb(&base)
    .map(|verb| Json(*verb))
    .ok_or(ApiError::NotFound("Verb"))
}
