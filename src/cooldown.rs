//! Per-caller cooldown for rate limited calls.
//!
//! Remembers the last accepted call for each caller address. A new call
//! inside the window is rejected and does not move the window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config;

pub struct Cooldown {
  window: Duration,
  last_calls: Mutex<HashMap<String, Instant>>,
}

impl Cooldown {
  pub fn new(window: Duration) -> Self {
    Self {
      window,
      last_calls: Mutex::new(HashMap::new()),
    }
  }

  /// Accept the call if the caller is outside its window.
  /// On rejection returns how long the caller still has to wait.
  pub fn try_acquire(&self, caller: &str, now: Instant) -> Result<(), Duration> {
    let mut last_calls = self
      .last_calls
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(last) = last_calls.get(caller) {
      let elapsed = now.saturating_duration_since(*last);
      if elapsed < self.window {
        return Err(self.window - elapsed);
      }
    }

    // Clean up stale callers occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      let window = self.window;
      last_calls.retain(|_, last| now.saturating_duration_since(*last) < window);
    }

    last_calls.insert(caller.to_string(), now);
    Ok(())
  }

  /// Number of callers currently tracked
  pub fn tracked(&self) -> usize {
    self
      .last_calls
      .lock()
      .map(|calls| calls.len())
      .unwrap_or_default()
  }
}

impl Default for Cooldown {
  fn default() -> Self {
    Self::new(Duration::from_millis(config::HINT_COOLDOWN_MS))
  }
}
