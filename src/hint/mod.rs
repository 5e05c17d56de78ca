//! Mnemonic hints from a text generation model.
//!
//! [`HintService`] owns the generator and the per-caller cooldown and turns
//! every failure into a friendly message the player can read.

mod client;
mod parse;
mod prompt;

pub use client::GeminiClient;
pub use parse::{extract_hint_text, segments, HintSegment, SegmentKind};
pub use prompt::{build_prompt, HintContext};

use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::HintConfig;
use crate::cooldown::Cooldown;
use crate::logging;

pub const UNAVAILABLE_MESSAGE: &str = "AI is currently unavailable. Please check configuration.";
pub const COOLDOWN_MESSAGE: &str = "Whoa there! I'm thinking as fast as I can. Please wait a moment.";
pub const EMPTY_MESSAGE: &str = "Sorry, I couldn't generate that right now.";
pub const FAILURE_MESSAGE: &str = "Oops! My AI brain is taking a nap. Please try again later.";

#[derive(Debug, thiserror::Error)]
pub enum HintError {
  #[error("hint request failed: {0}")]
  Request(#[from] reqwest::Error),
  #[error("hint API returned status {0}")]
  Status(u16),
  #[error("hint API returned no text")]
  EmptyReply,
}

pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, HintError>> + Send + 'a>>;

/// Anything that can turn a prompt into text
pub trait TextGenerator: Send + Sync {
  fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintStatus {
  Generated,
  Unavailable,
  CoolingDown,
  Empty,
  Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct HintReply {
  pub status: HintStatus,
  /// Hint sentence, or the message explaining why there is none
  pub text: String,
  pub segments: Vec<HintSegment>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub retry_after_ms: Option<u64>,
}

impl HintReply {
  fn new(status: HintStatus, text: String) -> Self {
    Self {
      status,
      segments: segments(&text),
      text,
      retry_after_ms: None,
    }
  }

  pub fn is_generated(&self) -> bool {
    self.status == HintStatus::Generated
  }
}

pub struct HintService {
  generator: Option<Arc<dyn TextGenerator>>,
  cooldown: Cooldown,
}

impl HintService {
  pub fn new(generator: Option<Arc<dyn TextGenerator>>, cooldown: Duration) -> Self {
    Self {
      generator,
      cooldown: Cooldown::new(cooldown),
    }
  }

  /// Build the service with a Gemini client when an API key is configured
  pub fn from_config(config: &HintConfig) -> Result<Self, HintError> {
    let generator: Option<Arc<dyn TextGenerator>> = match &config.api_key {
      Some(key) => Some(Arc::new(GeminiClient::new(key.clone(), config)?)),
      None => {
        tracing::warn!("GEMINI_API_KEY not set, hints are disabled");
        None
      }
    };
    Ok(Self::new(generator, config.cooldown))
  }

  pub fn is_available(&self) -> bool {
    self.generator.is_some()
  }

  /// Ask the model for a hint on behalf of `caller`.
  /// Never fails: problems come back as a reply with a non-generated status.
  pub async fn mnemonic(&self, caller: &str, prompt: &str) -> HintReply {
    let Some(generator) = &self.generator else {
      tracing::error!("Hint requested but no API key is configured");
      return HintReply::new(HintStatus::Unavailable, UNAVAILABLE_MESSAGE.to_string());
    };

    if let Err(wait) = self.cooldown.try_acquire(caller, Instant::now()) {
      let wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
      tracing::warn!(ip = %logging::mask_ip(caller), wait_ms, "Hint rate limited");
      let mut reply = HintReply::new(HintStatus::CoolingDown, COOLDOWN_MESSAGE.to_string());
      reply.retry_after_ms = Some(wait_ms);
      return reply;
    }

    tracing::info!(ip = %logging::mask_ip(caller), "Generating hint");
    match generator.generate(prompt).await {
      Ok(raw) => {
        let text = extract_hint_text(&raw);
        if text.is_empty() {
          HintReply::new(HintStatus::Empty, EMPTY_MESSAGE.to_string())
        } else {
          HintReply::new(HintStatus::Generated, text)
        }
      }
      Err(HintError::EmptyReply) => {
        tracing::warn!("Hint API returned no candidates");
        HintReply::new(HintStatus::Empty, EMPTY_MESSAGE.to_string())
      }
      Err(e) => {
        tracing::error!("Hint generation failed: {}", e);
        HintReply::new(HintStatus::Failed, FAILURE_MESSAGE.to_string())
      }
    }
  }
}
