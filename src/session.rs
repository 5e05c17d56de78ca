//! Simple in-memory session storage for quizzes and study decks.
//!
//! Entries are keyed by a random session ID handed to the client and
//! auto-expire after a configurable duration of inactivity.

use crate::config;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Session entry with last access time for expiration
struct SessionEntry<T> {
  value: T,
  last_access: DateTime<Utc>,
}

/// Expiring map from session ID to game state
pub struct SessionStore<T> {
  entries: Mutex<HashMap<String, SessionEntry<T>>>,
  expiry: Duration,
}

impl<T> Default for SessionStore<T> {
  fn default() -> Self {
    Self::new(Duration::hours(config::SESSION_EXPIRY_HOURS))
  }
}

impl<T> SessionStore<T> {
  pub fn new(expiry: Duration) -> Self {
    Self {
      entries: Mutex::new(HashMap::new()),
      expiry,
    }
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionEntry<T>>> {
    // Entries are plain data; recover them even if a holder panicked
    self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  /// Store a new value and return its session ID
  pub fn insert(&self, value: T) -> String {
    let mut entries = self.lock();

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut entries, Utc::now() - self.expiry);
    }

    let id = generate_session_id();
    entries.insert(
      id.clone(),
      SessionEntry {
        value,
        last_access: Utc::now(),
      },
    );
    id
  }

  /// Run `f` against a live session, refreshing its access time.
  /// Returns `None` for unknown or expired IDs.
  pub fn with<R>(&self, id: &str, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    let mut entries = self.lock();
    let now = Utc::now();

    let expired = entries
      .get(id)
      .is_some_and(|entry| entry.last_access <= now - self.expiry);
    if expired {
      entries.remove(id);
      return None;
    }

    let entry = entries.get_mut(id)?;
    entry.last_access = now;
    Some(f(&mut entry.value))
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Clean up expired sessions
fn cleanup_expired<T>(entries: &mut HashMap<String, SessionEntry<T>>, cutoff: DateTime<Utc>) {
  entries.retain(|_, entry| entry.last_access > cutoff);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
