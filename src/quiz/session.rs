//! Quiz session state machine.
//!
//! A session walks through three phases: playing (immediate or delayed
//! grading), finished, and optionally review. Answers and results are keyed
//! by question index and stay optional until set.

use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;

use super::evaluate::{evaluate, Evaluation};
use super::generate::build_questions;
use super::QuizError;
use crate::config;
use crate::domain::{percentage, rank_for, Answer, DifficultyFilter, Question, QuizMode, Rank, SoundCue};

/// Result of checking one answer in immediate mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
  pub index: usize,
  #[serde(flatten)]
  pub evaluation: Evaluation,
  pub streak: u32,
  pub cues: Vec<SoundCue>,
  /// True when the index had already been checked and nothing changed
  pub repeated: bool,
}

/// Final score of a quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummary {
  pub score: u32,
  pub total: u32,
  pub percentage: u32,
  pub rank: Rank,
  pub best_streak: u32,
  /// Score reached the pass ratio; the client shows confetti
  pub celebrate: bool,
  pub cues: Vec<SoundCue>,
}

/// What happened after a navigation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Navigation {
  Moved { index: usize },
  /// Stepping past the last question in immediate mode ends the quiz
  Finished { summary: QuizSummary },
  /// Target was out of range; the cursor did not move
  Ignored { index: usize },
}

/// Status of one question in the overview palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
  Unanswered,
  Answered,
  Correct,
  Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
  pub index: usize,
  pub status: QuestionStatus,
  pub current: bool,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
  mode: QuizMode,
  difficulty: DifficultyFilter,
  questions: Vec<Question>,
  answers: HashMap<usize, Answer>,
  results: HashMap<usize, bool>,
  streak: u32,
  best_streak: u32,
  current_index: usize,
  summary: Option<QuizSummary>,
}

impl QuizSession {
  /// Start a new quiz; review mode cannot be started directly
  pub fn start<R: Rng>(
    mode: QuizMode,
    count: usize,
    difficulty: DifficultyFilter,
    rng: &mut R,
  ) -> Result<Self, QuizError> {
    if mode == QuizMode::Review {
      return Err(QuizError::WrongMode(mode));
    }
    let questions = build_questions(count, difficulty, rng)?;
    Ok(Self::with_questions(mode, difficulty, questions))
  }

  /// Start a quiz over an explicit question list
  pub fn with_questions(mode: QuizMode, difficulty: DifficultyFilter, questions: Vec<Question>) -> Self {
    Self {
      mode,
      difficulty,
      questions,
      answers: HashMap::new(),
      results: HashMap::new(),
      streak: 0,
      best_streak: 0,
      current_index: 0,
      summary: None,
    }
  }

  pub fn mode(&self) -> QuizMode {
    self.mode
  }

  pub fn difficulty(&self) -> DifficultyFilter {
    self.difficulty
  }

  pub fn questions(&self) -> &[Question] {
    &self.questions
  }

  pub fn answer(&self, index: usize) -> Option<&Answer> {
    self.answers.get(&index)
  }

  pub fn result(&self, index: usize) -> Option<bool> {
    self.results.get(&index).copied()
  }

  pub fn streak(&self) -> u32 {
    self.streak
  }

  pub fn current_index(&self) -> usize {
    self.current_index
  }

  pub fn summary(&self) -> Option<&QuizSummary> {
    self.summary.as_ref()
  }

  pub fn is_finished(&self) -> bool {
    self.summary.is_some()
  }

  fn ensure_index(&self, index: usize) -> Result<(), QuizError> {
    if index < self.questions.len() {
      Ok(())
    } else {
      Err(QuizError::IndexOutOfRange {
        index,
        len: self.questions.len(),
      })
    }
  }

  /// Store an answer. Returns `false` when the session is in review mode,
  /// where answers are read-only and the call is a no-op.
  pub fn record_answer(&mut self, index: usize, answer: Answer) -> Result<bool, QuizError> {
    if self.mode == QuizMode::Review {
      return Ok(false);
    }
    if self.is_finished() {
      return Err(QuizError::AlreadyFinished);
    }
    self.ensure_index(index)?;
    // A checked answer is locked in immediate mode
    if self.results.contains_key(&index) {
      return Ok(false);
    }
    self.answers.insert(index, answer);
    Ok(true)
  }

  /// Grade one answer right away (immediate mode only)
  pub fn check(&mut self, index: usize) -> Result<CheckOutcome, QuizError> {
    if self.mode != QuizMode::Immediate {
      return Err(QuizError::WrongMode(self.mode));
    }
    if self.is_finished() {
      return Err(QuizError::AlreadyFinished);
    }
    self.ensure_index(index)?;

    let evaluation = evaluate(&self.questions[index], self.answers.get(&index));

    if self.results.contains_key(&index) {
      return Ok(CheckOutcome {
        index,
        evaluation,
        streak: self.streak,
        cues: Vec::new(),
        repeated: true,
      });
    }

    self.results.insert(index, evaluation.correct);

    let mut cues = Vec::new();
    if evaluation.correct {
      self.streak += 1;
      self.best_streak = self.best_streak.max(self.streak);
      cues.push(SoundCue::Correct);
      if self.streak > 1 {
        cues.push(SoundCue::Streak);
      }
    } else {
      self.streak = 0;
      cues.push(SoundCue::Incorrect);
    }

    Ok(CheckOutcome {
      index,
      evaluation,
      streak: self.streak,
      cues,
      repeated: false,
    })
  }

  /// Move the cursor; stepping past the end in immediate mode finishes the quiz
  pub fn navigate(&mut self, index: usize) -> Result<Navigation, QuizError> {
    if index < self.questions.len() {
      self.current_index = index;
      return Ok(Navigation::Moved { index });
    }

    if self.mode == QuizMode::Immediate && !self.is_finished() {
      let summary = self.finish()?;
      return Ok(Navigation::Finished { summary });
    }

    Ok(Navigation::Ignored {
      index: self.current_index,
    })
  }

  /// Grade the quiz and freeze it
  pub fn finish(&mut self) -> Result<QuizSummary, QuizError> {
    if self.is_finished() {
      return Err(QuizError::AlreadyFinished);
    }

    if self.mode == QuizMode::Delayed {
      let mut results = HashMap::with_capacity(self.questions.len());
      for (idx, question) in self.questions.iter().enumerate() {
        results.insert(idx, evaluate(question, self.answers.get(&idx)).correct);
      }
      self.results = results;
    }

    let score = self.results.values().filter(|correct| **correct).count() as u32;

    let total = self.questions.len() as u32;
    let pct = percentage(score, total);
    let celebrate = total > 0 && score as f64 >= total as f64 * config::PASS_RATIO;

    let summary = QuizSummary {
      score,
      total,
      percentage: pct,
      rank: rank_for(pct),
      best_streak: self.best_streak,
      celebrate,
      cues: if celebrate { vec![SoundCue::Win] } else { Vec::new() },
    };

    self.summary = Some(summary.clone());
    Ok(summary)
  }

  /// Switch a finished quiz to read-only review
  pub fn start_review(&mut self) -> Result<(), QuizError> {
    if !self.is_finished() {
      return Err(QuizError::NotFinished);
    }
    self.mode = QuizMode::Review;
    self.current_index = 0;
    Ok(())
  }

  /// Per-question overview
  pub fn palette(&self) -> Vec<PaletteEntry> {
    (0..self.questions.len())
      .map(|index| {
        let status = match self.results.get(&index) {
          Some(true) => QuestionStatus::Correct,
          Some(false) => QuestionStatus::Incorrect,
          None => match self.answers.get(&index) {
            Some(answer) if answer.is_complete(self.questions[index].question_type) => {
              QuestionStatus::Answered
            }
            _ => QuestionStatus::Unanswered,
          },
        };
        PaletteEntry {
          index,
          status,
          current: index == self.current_index,
        }
      })
      .collect()
  }
}
