use serde::{Deserialize, Serialize};

use super::verb::{Verb, VerbForm};

/// The three question formats of a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
  /// Type both the past simple and past participle
  Fill,
  /// Pick one form out of four options
  Mcq,
  /// Judge whether a shown form is right
  Tf,
}

/// A generated quiz question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
  pub id: String,
  pub verb: Verb,
  #[serde(rename = "type")]
  pub question_type: QuestionType,
  /// Form under test (mcq and tf only)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub form: Option<VerbForm>,
  /// Expected option (mcq only)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub correct_answer: Option<String>,
  /// Shuffled options including the correct one (mcq only)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub options: Option<Vec<String>>,
  /// Whether the shown statement is true (tf only)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_true: Option<bool>,
  /// Form shown in the statement (tf only)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_value: Option<String>,
}

impl Question {
  pub fn fill(id: String, verb: Verb) -> Self {
    Self {
      id,
      verb,
      question_type: QuestionType::Fill,
      form: None,
      correct_answer: None,
      options: None,
      is_true: None,
      target_value: None,
    }
  }

  pub fn mcq(id: String, verb: Verb, form: VerbForm, options: Vec<String>) -> Self {
    Self {
      id,
      verb,
      question_type: QuestionType::Mcq,
      form: Some(form),
      correct_answer: Some(verb.form(form).to_string()),
      options: Some(options),
      is_true: None,
      target_value: None,
    }
  }

  pub fn true_false(id: String, verb: Verb, form: VerbForm, is_true: bool, target: String) -> Self {
    Self {
      id,
      verb,
      question_type: QuestionType::Tf,
      form: Some(form),
      correct_answer: None,
      options: None,
      is_true: Some(is_true),
      target_value: Some(target),
    }
  }
}

/// Answer given by the player; fields are filled depending on question type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub simple: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub participle: Option<String>,
  /// Selected option for mcq, or "True"/"False" for tf
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub selected: Option<String>,
}

impl Answer {
  pub fn typed(simple: &str, participle: &str) -> Self {
    Self {
      simple: Some(simple.to_string()),
      participle: Some(participle.to_string()),
      selected: None,
    }
  }

  pub fn selected(value: &str) -> Self {
    Self {
      selected: Some(value.to_string()),
      ..Self::default()
    }
  }

  /// Whether enough has been entered to check this answer
  pub fn is_complete(&self, question_type: QuestionType) -> bool {
    fn filled(s: &Option<String>) -> bool {
      s.as_deref().is_some_and(|v| !v.is_empty())
    }
    match question_type {
      QuestionType::Fill => filled(&self.simple) && filled(&self.participle),
      QuestionType::Mcq | QuestionType::Tf => filled(&self.selected),
    }
  }
}

/// How answers are evaluated during a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
  /// Each answer is checked right away
  #[default]
  Immediate,
  /// Everything is graded when the quiz is finished
  Delayed,
  /// Read-only walk through a finished quiz
  Review,
}

impl QuizMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Immediate => "immediate",
      Self::Delayed => "delayed",
      Self::Review => "review",
    }
  }
}

/// Sound a client should play in response to a game event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
  Correct,
  Incorrect,
  Streak,
  Win,
  Pop,
}
