//! Grading of a single answer.

use serde::Serialize;

use crate::domain::{Answer, Question, QuestionType};
use crate::validation::{check_fill, says_true, FillCheck};

/// Graded answer with per-form detail for fill questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
  pub correct: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fill: Option<FillCheck>,
}

/// Whether `answer` solves `question`; a missing answer is wrong
pub fn calculate_result(question: &Question, answer: Option<&Answer>) -> bool {
  evaluate(question, answer).correct
}

pub fn evaluate(question: &Question, answer: Option<&Answer>) -> Evaluation {
  let Some(answer) = answer else {
    return Evaluation {
      correct: false,
      fill: None,
    };
  };

  match question.question_type {
    QuestionType::Fill => {
      let check = check_fill(answer, &question.verb);
      Evaluation {
        correct: check.is_correct(),
        fill: Some(check),
      }
    }
    // Options are picked, not typed, so they must match exactly
    QuestionType::Mcq => Evaluation {
      correct: answer.selected.is_some() && answer.selected == question.correct_answer,
      fill: None,
    },
    QuestionType::Tf => Evaluation {
      correct: question
        .is_true
        .is_some_and(|is_true| says_true(answer.selected.as_deref()) == is_true),
      fill: None,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Difficulty, Verb, VerbForm};
  use crate::validation::FormResult;

  const EAT: Verb = Verb::new("eat", "ate", "eaten", Difficulty::Common);

  fn mcq() -> Question {
    Question::mcq(
      "q1".to_string(),
      EAT,
      VerbForm::Simple,
      vec!["ate".into(), "went".into(), "saw".into(), "took".into()],
    )
  }

  #[test]
  fn test_missing_answer_is_wrong() {
    assert!(!calculate_result(&Question::fill("q".into(), EAT), None));
    assert!(!calculate_result(&mcq(), None));
  }

  #[test]
  fn test_fill() {
    let q = Question::fill("q".into(), EAT);
    assert!(calculate_result(&q, Some(&Answer::typed("Ate", " eaten"))));
    let eval = evaluate(&q, Some(&Answer::typed("ate", "eatn")));
    assert!(!eval.correct);
    assert_eq!(eval.fill.unwrap().participle, FormResult::NearMiss);
  }

  #[test]
  fn test_mcq_is_exact() {
    let q = mcq();
    assert!(calculate_result(&q, Some(&Answer::selected("ate"))));
    assert!(!calculate_result(&q, Some(&Answer::selected("Ate"))));
    assert!(!calculate_result(&q, Some(&Answer::selected("went"))));
    assert!(!calculate_result(&q, Some(&Answer::default())));
  }

  #[test]
  fn test_true_false() {
    let true_q = Question::true_false("t".into(), EAT, VerbForm::Participle, true, "eaten".into());
    let false_q = Question::true_false("f".into(), EAT, VerbForm::Participle, false, "drunk".into());

    assert!(calculate_result(&true_q, Some(&Answer::selected("True"))));
    assert!(!calculate_result(&true_q, Some(&Answer::selected("False"))));
    assert!(calculate_result(&false_q, Some(&Answer::selected("False"))));
    assert!(!calculate_result(&false_q, Some(&Answer::selected("True"))));
    // Anything that is not "True" counts as saying false
    assert!(calculate_result(&false_q, Some(&Answer::default())));
  }
}
