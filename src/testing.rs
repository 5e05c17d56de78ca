//! Test utilities for database and state setup.
//!
//! Reuses the production initialization so tests run against the real
//! schema in a throwaway directory.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use crate::db::{self, DbPool};
use crate::hint::{HintService, TextGenerator};
use crate::state::AppState;

/// File-backed game database in a temporary directory.
///
/// The directory (and the database in it) is removed when dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    pub pool: DbPool,
}

impl TestEnv {
    /// Create a test environment with a freshly migrated database.
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let pool = db::init_db(&temp.path().join("verbs.db"))?;
        Ok(Self { temp, pool })
    }

    /// Application state over this database with an optional hint generator
    pub fn state(&self, generator: Option<Arc<dyn TextGenerator>>) -> AppState {
        AppState::new(
            self.pool.clone(),
            HintService::new(generator, Duration::from_millis(2000)),
        )
    }
}
