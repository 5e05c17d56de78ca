//! Application configuration.
//!
//! Game tuning values live here as constants. Deployment values (database
//! location, port, hint service credentials) are resolved with the priority
//! config.toml > environment (.env included) > default.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;

// ==================== Config File ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<DatabaseSection>,
    server: Option<ServerSection>,
    hint: Option<HintSection>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct HintSection {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    cooldown_ms: Option<u64>,
}

/// Settings for the mnemonic hint proxy
#[derive(Debug, Clone)]
pub struct HintConfig {
    /// Gemini API key; hints are disabled when absent
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Minimum gap between two hint calls from the same caller
    pub cooldown: Duration,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_HINT_MODEL.to_string(),
            base_url: DEFAULT_HINT_BASE_URL.to_string(),
            cooldown: Duration::from_millis(HINT_COOLDOWN_MS),
        }
    }
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub port: u16,
    pub hint: HintConfig,
}

impl AppConfig {
    /// Load configuration from config.toml, the process environment and .env
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let contents = std::fs::read_to_string("config.toml").ok();
        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from raw config.toml contents and an env lookup
    pub fn from_sources(toml_contents: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = match toml_contents.map(toml::from_str::<FileConfig>) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                tracing::warn!("Ignoring malformed config.toml: {}", e);
                FileConfig::default()
            }
            None => FileConfig::default(),
        };
        let database = file.database.unwrap_or_default();
        let server = file.server.unwrap_or_default();
        let hint = file.hint.unwrap_or_default();

        let database_path = match database.path.or_else(|| env("DATABASE_PATH")) {
            Some(path) => {
                tracing::info!("Using database path: {}", path);
                PathBuf::from(path)
            }
            None => PathBuf::from(paths::db_path()),
        };

        let port = server
            .port
            .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
            .unwrap_or(SERVER_PORT);

        let cooldown_ms = hint
            .cooldown_ms
            .or_else(|| env("HINT_COOLDOWN_MS").and_then(|v| v.parse().ok()))
            .unwrap_or(HINT_COOLDOWN_MS);

        let hint = HintConfig {
            api_key: hint
                .api_key
                .or_else(|| env("GEMINI_API_KEY"))
                .filter(|k| !k.trim().is_empty()),
            model: hint
                .model
                .or_else(|| env("GEMINI_MODEL"))
                .unwrap_or_else(|| DEFAULT_HINT_MODEL.to_string()),
            base_url: hint
                .base_url
                .or_else(|| env("GEMINI_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_HINT_BASE_URL.to_string()),
            cooldown: Duration::from_millis(cooldown_ms),
        };

        Self {
            database_path,
            port,
            hint,
        }
    }

    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", SERVER_ADDR, self.port)
    }
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 3000;

// ==================== Session Configuration ====================

/// Quiz sessions and study decks expire after this many hours of inactivity
pub const SESSION_EXPIRY_HOURS: i64 = 2;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

// ==================== Quiz Configuration ====================

/// Number of distractor choices in multiple choice mode
pub const DISTRACTOR_COUNT: usize = 3;

/// Draws at or below this value produce a fill-in-the-blank question
pub const FILL_THRESHOLD: f64 = 0.4;

/// Draws from this value upward produce a true/false question
pub const TRUE_FALSE_THRESHOLD: f64 = 0.75;

/// Share of correct answers needed for a celebration
pub const PASS_RATIO: f64 = 0.6;

/// Default quiz length
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Length of generated question ids
pub const QUESTION_ID_LEN: usize = 9;

// ==================== Hint Configuration ====================

pub const DEFAULT_HINT_MODEL: &str = "gemma-3-27b-it";

pub const DEFAULT_HINT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Cooldown per caller address, in milliseconds
pub const HINT_COOLDOWN_MS: u64 = 2000;

/// Timeout for a single hint request
pub const HINT_REQUEST_TIMEOUT_SECS: u64 = 20;

// ==================== Sound Settings ====================

pub const DEFAULT_SPEECH_RATE: f64 = 0.9;
pub const MIN_SPEECH_RATE: f64 = 0.5;
pub const MAX_SPEECH_RATE: f64 = 1.5;

// ==================== Query Limits ====================

/// Default number of games returned by the history endpoint
pub const DEFAULT_HISTORY_LIMIT: i64 = 20;

/// Hard cap on the history endpoint
pub const MAX_HISTORY_LIMIT: i64 = 200;
