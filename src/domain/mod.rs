pub mod question;
pub mod rank;
pub mod verb;

pub use question::{Answer, Question, QuestionType, QuizMode, SoundCue};
pub use rank::{percentage, rank_for, Rank, INITIAL_RANK_TITLE};
pub use verb::{Difficulty, DifficultyFilter, Verb, VerbForm};
