//! Mnemonic hint proxy.

use axum::{
  extract::State,
  http::{header, HeaderMap, HeaderValue, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult};
use crate::content;
use crate::domain::SoundCue;
use crate::hint::{build_prompt, HintContext, HintReply, HintStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HintRequest {
  /// Base form of the verb
  pub verb: String,
  #[serde(default)]
  pub context: HintContext,
  pub previous_hint: Option<String>,
  /// Study deck to mark the verb as learned in
  pub deck_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HintResponse {
  #[serde(flatten)]
  pub reply: HintReply,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub learned_count: Option<usize>,
  pub cues: Vec<SoundCue>,
}

/// Address of the caller as reported by the proxy in front of us
pub fn caller_address(headers: &HeaderMap) -> String {
  let forwarded = headers
    .get("x-forwarded-for")
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(',').next())
    .map(str::trim)
    .filter(|v| !v.is_empty());

  let real_ip = || {
    headers
      .get("x-real-ip")
      .and_then(|v| v.to_str().ok())
      .map(str::trim)
      .filter(|v| !v.is_empty())
  };

  forwarded
    .or_else(real_ip)
    .unwrap_or("unknown")
    .to_string()
}

/// POST /api/hint
pub async fn request_hint(
  State(state): State<AppState>,
  headers: HeaderMap,
  Json(request): Json<HintRequest>,
) -> ApiResult<Response> {
  let verb = content::find_verb(&request.verb).ok_or(ApiError::NotFound("Verb"))?;
  let prompt = build_prompt(request.context, verb, request.previous_hint.as_deref());
  let caller = caller_address(&headers);

  // Asking for a hint on a flashcard counts as discovering the verb,
  // whether or not a hint comes back
  let learned_count = request.deck_id.as_deref().and_then(|deck_id| {
    state.decks.with(deck_id, |deck| {
      deck.discover(verb.base);
      deck.learned_count()
    })
  });

  let reply = state.hints.mnemonic(&caller, &prompt).await;

  let status = match reply.status {
    HintStatus::CoolingDown => StatusCode::TOO_MANY_REQUESTS,
    HintStatus::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    HintStatus::Generated | HintStatus::Empty | HintStatus::Failed => StatusCode::OK,
  };
  let retry_after = reply
    .retry_after_ms
    .map(|ms| ms.div_ceil(1000).max(1))
    .and_then(|secs| HeaderValue::from_str(&secs.to_string()).ok());

  let mut response = (status, Json(HintResponse {
    reply,
    learned_count,
    cues: vec![SoundCue::Pop],
  })).into_response();
  if let Some(value) = retry_after {
    response.headers_mut().insert(header::RETRY_AFTER, value);
  }
  Ok(response)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
      map.insert(*name, HeaderValue::from_static(value));
    }
    map
  }

  #[test]
  fn test_caller_from_forwarded_for() {
    let map = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1"), ("x-real-ip", "10.0.0.9")]);
    assert_eq!(caller_address(&map), "203.0.113.7");
  }

  #[test]
  fn test_caller_from_real_ip() {
    assert_eq!(caller_address(&headers(&[("x-real-ip", "10.0.0.9")])), "10.0.0.9");
    assert_eq!(
      caller_address(&headers(&[("x-forwarded-for", " "), ("x-real-ip", "10.0.0.9")])),
      "10.0.0.9"
    );
  }

  #[test]
  fn test_unknown_caller() {
    assert_eq!(caller_address(&HeaderMap::new()), "unknown");
  }
}
