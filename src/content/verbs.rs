//! The irregular verb table.

use serde::Serialize;

use crate::domain::{Difficulty, DifficultyFilter, Verb};
use crate::validation::normalize;

use Difficulty::{Advanced, Common};

static VERBS: [Verb; 54] = [
  Verb::new("awake", "awoke", "awoken", Advanced),
  Verb::new("beat", "beat", "beaten", Common),
  Verb::new("begin", "began", "begun", Common),
  Verb::new("bend", "bent", "bent", Common),
  Verb::new("blow", "blew", "blown", Common),
  Verb::new("break", "broke", "broken", Common),
  Verb::new("bring", "brought", "brought", Common),
  Verb::new("buy", "bought", "bought", Common),
  Verb::new("catch", "caught", "caught", Common),
  Verb::new("choose", "chose", "chosen", Common),
  Verb::new("come", "came", "come", Common),
  Verb::new("do", "did", "done", Common),
  Verb::new("draw", "drew", "drawn", Common),
  Verb::new("drink", "drank", "drunk", Common),
  Verb::new("drive", "drove", "driven", Common),
  Verb::new("eat", "ate", "eaten", Common),
  Verb::new("fall", "fell", "fallen", Common),
  Verb::new("feel", "felt", "felt", Common),
  Verb::new("find", "found", "found", Common),
  Verb::new("fly", "flew", "flown", Common),
  Verb::new("forget", "forgot", "forgotten", Common),
  Verb::new("freeze", "froze", "frozen", Advanced),
  Verb::new("get", "got", "gotten", Common),
  Verb::new("give", "gave", "given", Common),
  Verb::new("go", "went", "gone", Common),
  Verb::new("grow", "grew", "grown", Common),
  Verb::new("hang", "hung", "hung", Advanced),
  Verb::new("have", "had", "had", Common),
  Verb::new("hear", "heard", "heard", Common),
  Verb::new("keep", "kept", "kept", Common),
  Verb::new("know", "knew", "known", Common),
  Verb::new("leave", "left", "left", Common),
  Verb::new("lie", "lay", "lain", Advanced),
  Verb::new("make", "made", "made", Common),
  Verb::new("put", "put", "put", Common),
  Verb::new("read", "read", "read", Common),
  Verb::new("ride", "rode", "ridden", Common),
  Verb::new("ring", "rang", "rung", Common),
  Verb::new("run", "ran", "run", Common),
  Verb::new("say", "said", "said", Common),
  Verb::new("see", "saw", "seen", Common),
  Verb::new("sing", "sang", "sung", Common),
  Verb::new("sleep", "slept", "slept", Common),
  Verb::new("speak", "spoke", "spoken", Common),
  Verb::new("spend", "spent", "spent", Common),
  Verb::new("steal", "stole", "stolen", Common),
  Verb::new("swim", "swam", "swum", Common),
  Verb::new("take", "took", "taken", Common),
  Verb::new("think", "thought", "thought", Common),
  Verb::new("throw", "threw", "thrown", Common),
  Verb::new("wake", "woke", "woken", Common),
  Verb::new("wear", "wore", "worn", Common),
  Verb::new("write", "wrote", "written", Common),
  Verb::new("lose", "lost", "lost", Common),
];

/// Every bundled verb in table order
pub fn all_verbs() -> &'static [Verb] {
  &VERBS
}

/// Look up a verb by its base form, ignoring case and surrounding whitespace
pub fn find_verb(base: &str) -> Option<&'static Verb> {
  let wanted = normalize(base);
  VERBS.iter().find(|v| v.base == wanted)
}

/// Verbs matching a difficulty selection
pub fn verbs_for(filter: DifficultyFilter) -> Vec<Verb> {
  VERBS
    .iter()
    .filter(|v| filter.accepts(v.difficulty))
    .copied()
    .collect()
}

/// Pool sizes shown on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifficultyCounts {
  pub total: usize,
  pub common: usize,
  pub advanced: usize,
}

pub fn difficulty_counts() -> DifficultyCounts {
  let advanced = VERBS.iter().filter(|v| v.difficulty == Advanced).count();
  DifficultyCounts {
    total: VERBS.len(),
    common: VERBS.len() - advanced,
    advanced,
  }
}
