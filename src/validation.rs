//! Answer normalization and comparison for typed verb forms.
//!
//! Typed answers are compared after trimming and lowercasing. A form that
//! is a single edit away from the expected one is still wrong, but it is
//! reported as a near miss so the client can say "almost!".

use serde::{Deserialize, Serialize};

use crate::domain::{Answer, Verb};

/// Label a true/false answer must carry to count as "true"
pub const TRUE_LABEL: &str = "True";

// ============================================================================
// Normalization
// ============================================================================

/// Trim surrounding whitespace and lowercase
pub fn normalize(text: &str) -> String {
  text.trim().to_lowercase()
}

/// Compare a typed form with the expected one after normalization
pub fn forms_match(input: &str, expected: &str) -> bool {
  normalize(input) == normalize(expected)
}

// ============================================================================
// Result types
// ============================================================================

/// Outcome for a single typed form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormResult {
  Correct,
  /// One typo away from the expected form; still counted wrong
  NearMiss,
  Incorrect,
  /// Nothing was entered
  Missing,
}

impl FormResult {
  pub fn is_correct(&self) -> bool {
    matches!(self, Self::Correct)
  }
}

/// Per-form breakdown of a fill-in-the-blank answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillCheck {
  pub simple: FormResult,
  pub participle: FormResult,
}

impl FillCheck {
  /// A fill question is only right when both forms are right
  pub fn is_correct(&self) -> bool {
    self.simple.is_correct() && self.participle.is_correct()
  }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate one typed form against the expected form
pub fn validate_form(input: Option<&str>, expected: &str) -> FormResult {
  let input = normalize(input.unwrap_or(""));
  if input.is_empty() {
    return FormResult::Missing;
  }

  let expected = normalize(expected);
  if input == expected {
    FormResult::Correct
  } else if expected.chars().count() > 2 && levenshtein_distance(&input, &expected) == 1 {
    FormResult::NearMiss
  } else {
    FormResult::Incorrect
  }
}

/// Check both typed forms of a fill-in-the-blank answer
pub fn check_fill(answer: &Answer, verb: &Verb) -> FillCheck {
  FillCheck {
    simple: validate_form(answer.simple.as_deref(), verb.simple),
    participle: validate_form(answer.participle.as_deref(), verb.participle),
  }
}

/// Whether a true/false selection means "true"
pub fn says_true(selected: Option<&str>) -> bool {
  selected == Some(TRUE_LABEL)
}

/// Calculate simple Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
  let a_chars: Vec<char> = a.chars().collect();
  let b_chars: Vec<char> = b.chars().collect();
  let a_len = a_chars.len();
  let b_len = b_chars.len();

  if a_len == 0 {
    return b_len;
  }
  if b_len == 0 {
    return a_len;
  }

  // Two rolling rows are enough for single-word answers
  let mut prev: Vec<usize> = (0..=b_len).collect();
  let mut curr = vec![0usize; b_len + 1];

  for i in 1..=a_len {
    curr[0] = i;
    for j in 1..=b_len {
      let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
      curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
    }
    std::mem::swap(&mut prev, &mut curr);
  }

  prev[b_len]
}
