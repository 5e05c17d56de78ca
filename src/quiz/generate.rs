//! Question generation for a new quiz.

use rand::seq::SliceRandom;
use rand::Rng;

use super::distractors::random_distractors;
use super::QuizError;
use crate::config;
use crate::content::verbs_for;
use crate::domain::{DifficultyFilter, Question, QuestionType, Verb, VerbForm};

/// Build `count` questions from a shuffled sample of the filtered verbs.
///
/// Counts above the pool size are clamped, so a large number stands for
/// "all verbs".
pub fn build_questions<R: Rng>(
  count: usize,
  difficulty: DifficultyFilter,
  rng: &mut R,
) -> Result<Vec<Question>, QuizError> {
  if count == 0 {
    return Err(QuizError::EmptyQuiz);
  }

  let mut verbs = verbs_for(difficulty);
  if verbs.is_empty() {
    return Err(QuizError::NoVerbs(difficulty));
  }

  verbs.shuffle(rng);
  verbs.truncate(count);

  Ok(verbs.into_iter().map(|verb| build_question(verb, rng)).collect())
}

/// Map a uniform draw in [0, 1) to a question type
pub fn question_type_for(draw: f64) -> QuestionType {
  if draw >= config::TRUE_FALSE_THRESHOLD {
    QuestionType::Tf
  } else if draw > config::FILL_THRESHOLD {
    QuestionType::Mcq
  } else {
    QuestionType::Fill
  }
}

fn build_question<R: Rng>(verb: Verb, rng: &mut R) -> Question {
  let id = question_id(rng);

  match question_type_for(rng.random::<f64>()) {
    QuestionType::Fill => Question::fill(id, verb),
    QuestionType::Mcq => {
      let form = random_form(rng);
      let correct = verb.form(form);
      let mut options = vec![correct.to_string()];
      options.extend(random_distractors(correct, form, config::DISTRACTOR_COUNT, rng));
      options.shuffle(rng);
      Question::mcq(id, verb, form, options)
    }
    QuestionType::Tf => {
      let form = random_form(rng);
      let correct = verb.form(form);
      let wants_true = rng.random_bool(0.5);

      let wrong = if wants_true {
        None
      } else {
        random_distractors(correct, form, 1, rng).into_iter().next()
      };

      match wrong {
        Some(target) => Question::true_false(id, verb, form, false, target),
        None => Question::true_false(id, verb, form, true, correct.to_string()),
      }
    }
  }
}

fn random_form<R: Rng>(rng: &mut R) -> VerbForm {
  if rng.random_bool(0.5) {
    VerbForm::Simple
  } else {
    VerbForm::Participle
  }
}

/// Short base-36 identifier for a question
pub fn question_id<R: Rng>(rng: &mut R) -> String {
  (0..config::QUESTION_ID_LEN)
    .map(|_| {
      let idx: u8 = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
