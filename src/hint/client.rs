//! Client for the Gemini `generateContent` endpoint.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GenerateFuture, HintError, TextGenerator};
use crate::config::{self, HintConfig};
use crate::logging;

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
  contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
  parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
  text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
  text: Option<String>,
}

impl GenerateContentResponse {
  /// Text of the first part of the first candidate, if it has any
  fn first_text(self) -> Option<String> {
    self
      .candidates
      .into_iter()
      .next()?
      .content?
      .parts
      .into_iter()
      .next()?
      .text
      .filter(|text| !text.trim().is_empty())
  }
}

pub struct GeminiClient {
  http: reqwest::Client,
  api_key: String,
  endpoint: String,
}

impl GeminiClient {
  pub fn new(api_key: String, config: &HintConfig) -> Result<Self, HintError> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config::HINT_REQUEST_TIMEOUT_SECS))
      .build()?;

    Ok(Self {
      http,
      api_key,
      endpoint: format!(
        "{}/models/{}:generateContent",
        config.base_url.trim_end_matches('/'),
        config.model
      ),
    })
  }

  async fn request(&self, prompt: &str) -> Result<String, HintError> {
    let body = GenerateContentRequest {
      contents: vec![Content {
        parts: vec![Part { text: prompt }],
      }],
    };

    let response = self
      .http
      .post(&self.endpoint)
      .query(&[("key", self.api_key.as_str())])
      .json(&body)
      .send()
      .await
      .map_err(reqwest::Error::without_url)?;

    let status = response.status();
    if !status.is_success() {
      let text = response.text().await.unwrap_or_default();
      tracing::error!(
        status = status.as_u16(),
        body = %logging::redact_body(&text),
        "Gemini API returned an error"
      );
      return Err(HintError::Status(status.as_u16()));
    }

    let parsed: GenerateContentResponse = response.json().await.map_err(reqwest::Error::without_url)?;
    parsed.first_text().ok_or(HintError::EmptyReply)
  }
}

impl TextGenerator for GeminiClient {
  fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
    Box::pin(self.request(prompt))
  }
}
