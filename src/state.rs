//! Application state shared by all handlers.

use std::sync::Arc;

use crate::db::DbPool;
use crate::hint::HintService;
use crate::quiz::{QuizSession, StudyDeck};
use crate::session::SessionStore;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Stats, identity and settings
    pub db: DbPool,

    /// Quizzes in progress, keyed by quiz ID
    pub quizzes: Arc<SessionStore<QuizSession>>,

    /// Flashcard decks, keyed by deck ID
    pub decks: Arc<SessionStore<StudyDeck>>,

    pub hints: Arc<HintService>,
}

impl AppState {
    pub fn new(db: DbPool, hints: HintService) -> Self {
        Self {
            db,
            quizzes: Arc::new(SessionStore::default()),
            decks: Arc::new(SessionStore::default()),
            hints: Arc::new(hints),
        }
    }
}
