use serde::{Deserialize, Serialize};

/// How hard a verb is considered for learners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Common,
  Advanced,
}

/// Difficulty selection offered when starting a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyFilter {
  #[default]
  All,
  Common,
  Advanced,
}

impl DifficultyFilter {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::All => "all",
      Self::Common => "common",
      Self::Advanced => "advanced",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "all" => Some(Self::All),
      "common" => Some(Self::Common),
      "advanced" => Some(Self::Advanced),
      _ => None,
    }
  }

  pub fn accepts(&self, difficulty: Difficulty) -> bool {
    match self {
      Self::All => true,
      Self::Common => difficulty == Difficulty::Common,
      Self::Advanced => difficulty == Difficulty::Advanced,
    }
  }
}

/// Which inflected form a question is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbForm {
  /// Past simple ("went")
  Simple,
  /// Past participle ("gone")
  Participle,
}

/// An irregular verb with its three principal parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verb {
  pub base: &'static str,
  pub simple: &'static str,
  pub participle: &'static str,
  pub difficulty: Difficulty,
}

impl Verb {
  pub const fn new(
    base: &'static str,
    simple: &'static str,
    participle: &'static str,
    difficulty: Difficulty,
  ) -> Self {
    Self {
      base,
      simple,
      participle,
      difficulty,
    }
  }

  /// The requested inflected form
  pub fn form(&self, form: VerbForm) -> &'static str {
    match form {
      VerbForm::Simple => self.simple,
      VerbForm::Participle => self.participle,
    }
  }
}
