//! Quiz engine: question generation, grading, sessions and flashcards.
//!
//! Everything here is pure game logic. Randomness is passed in so the
//! handlers can use the thread RNG while tests use seeded generators.

pub mod distractors;
pub mod evaluate;
pub mod generate;
pub mod session;
pub mod study;

use crate::domain::{DifficultyFilter, QuizMode};

pub use distractors::random_distractors;
pub use evaluate::{calculate_result, evaluate, Evaluation};
pub use generate::{build_questions, question_type_for};
pub use session::{CheckOutcome, Navigation, PaletteEntry, QuestionStatus, QuizSession, QuizSummary};
pub use study::{StudyCard, StudyDeck};

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
  #[error("A quiz needs at least one question")]
  EmptyQuiz,
  #[error("No verbs available for difficulty '{}'", .0.as_str())]
  NoVerbs(DifficultyFilter),
  #[error("Question {index} does not exist (quiz has {len})")]
  IndexOutOfRange { index: usize, len: usize },
  #[error("Not available in {} mode", .0.as_str())]
  WrongMode(QuizMode),
  #[error("Quiz is already finished")]
  AlreadyFinished,
  #[error("Quiz is not finished yet")]
  NotFinished,
}
