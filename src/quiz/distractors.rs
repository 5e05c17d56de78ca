//! Wrong-answer sampling for multiple choice and true/false questions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::content::all_verbs;
use crate::domain::VerbForm;

/// Sample up to `count` wrong forms of the given kind.
///
/// The pool is the requested form of every bundled verb, regardless of the
/// quiz difficulty, minus the correct answer. Duplicates are collapsed so the
/// options a player sees are always distinct.
pub fn random_distractors<R: Rng>(
  correct: &str,
  form: VerbForm,
  count: usize,
  rng: &mut R,
) -> Vec<String> {
  let mut pool: Vec<&'static str> = all_verbs()
    .iter()
    .map(|v| v.form(form))
    .filter(|answer| *answer != correct)
    .collect();

  pool.sort_unstable();
  pool.dedup();
  pool.shuffle(rng);
  pool.truncate(count);

  pool.into_iter().map(str::to_string).collect()
}
