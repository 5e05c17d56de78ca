//! Key/value settings and the sound preferences stored in them

use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::Serialize;

use crate::config::{DEFAULT_SPEECH_RATE, MAX_SPEECH_RATE, MIN_SPEECH_RATE};

const MUTED_KEY: &str = "muted";
const SPEECH_RATE_KEY: &str = "speech_rate";

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
  conn
    .query_row("SELECT value FROM settings WHERE key = ?1", params![key], |row| row.get(0))
    .optional()
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
  conn.execute(
    "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
    params![key, value],
  )?;
  Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundSettings {
  pub muted: bool,
  /// Text-to-speech rate multiplier
  pub speech_rate: f64,
}

impl Default for SoundSettings {
  fn default() -> Self {
    Self {
      muted: false,
      speech_rate: DEFAULT_SPEECH_RATE,
    }
  }
}

pub fn get_sound_settings(conn: &Connection) -> Result<SoundSettings> {
  let muted = get_setting(conn, MUTED_KEY)?.is_some_and(|v| v == "true");
  let speech_rate = get_setting(conn, SPEECH_RATE_KEY)?
    .and_then(|v| v.parse::<f64>().ok())
    .map(clamp_speech_rate)
    .unwrap_or(DEFAULT_SPEECH_RATE);

  Ok(SoundSettings { muted, speech_rate })
}

pub fn set_muted(conn: &Connection, muted: bool) -> Result<()> {
  set_setting(conn, MUTED_KEY, if muted { "true" } else { "false" })
}

/// Store a speech rate, clamped to the supported range. Returns the stored value.
pub fn set_speech_rate(conn: &Connection, rate: f64) -> Result<f64> {
  let rate = clamp_speech_rate(rate);
  set_setting(conn, SPEECH_RATE_KEY, &rate.to_string())?;
  Ok(rate)
}

fn clamp_speech_rate(rate: f64) -> f64 {
  if rate.is_finite() {
    rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE)
  } else {
    DEFAULT_SPEECH_RATE
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::run_migrations;

  fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
  }

  #[test]
  fn test_get_set_setting() {
    let conn = conn();
    assert_eq!(get_setting(&conn, "missing").unwrap(), None);
    set_setting(&conn, "k", "v1").unwrap();
    set_setting(&conn, "k", "v2").unwrap();
    assert_eq!(get_setting(&conn, "k").unwrap().as_deref(), Some("v2"));
  }

  #[test]
  fn test_sound_defaults() {
    assert_eq!(get_sound_settings(&conn()).unwrap(), SoundSettings::default());
  }

  #[test]
  fn test_mute_and_rate() {
    let conn = conn();
    set_muted(&conn, true).unwrap();
    assert_eq!(set_speech_rate(&conn, 1.2).unwrap(), 1.2);

    let settings = get_sound_settings(&conn).unwrap();
    assert!(settings.muted);
    assert_eq!(settings.speech_rate, 1.2);
  }

  #[test]
  fn test_speech_rate_is_clamped() {
    let conn = conn();
    assert_eq!(set_speech_rate(&conn, 9.0).unwrap(), MAX_SPEECH_RATE);
    assert_eq!(set_speech_rate(&conn, 0.1).unwrap(), MIN_SPEECH_RATE);
    assert_eq!(set_speech_rate(&conn, f64::NAN).unwrap(), DEFAULT_SPEECH_RATE);

    // Values edited by hand are clamped on read
    set_setting(&conn, SPEECH_RATE_KEY, "4").unwrap();
    assert_eq!(get_sound_settings(&conn).unwrap().speech_rate, MAX_SPEECH_RATE);
  }
}
