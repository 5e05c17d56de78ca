//! Prompts sent to the text generation model.

use serde::Deserialize;

use crate::domain::Verb;

/// Screen the hint was requested from; each gets its own tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintContext {
  /// Flashcards: a funny sentence for young learners
  #[default]
  Study,
  /// During a quiz: a short memory trick
  Quiz,
}

const FORMAT_RULES: &str =
  "Use **bold** text (double asterisks) for the three verb forms only. Do NOT use single quotes for markers.";

/// Build the mnemonic prompt for a verb.
///
/// When the player asks for another hint the previous one is passed back so
/// the model is told not to repeat it.
pub fn build_prompt(context: HintContext, verb: &Verb, previous_hint: Option<&str>) -> String {
  let avoid = previous_hint
    .map(str::trim)
    .filter(|hint| !hint.is_empty())
    .map(|hint| {
      format!(
        " IMPORTANT: Do not use or repeat this previous hint: \"{}\". Provide a completely different explanation or trick.",
        hint
      )
    })
    .unwrap_or_default();

  match context {
    HintContext::Study => format!(
      "Write one very simple, funny sentence for a 3rd grader that helps them remember that the verb \"{}\" changes to \"{}\" and \"{}\".\n{}\nKeep it to a single sentence.{} Return ONLY a JSON object: {{\"hint\": \"the simple sentence\"}}",
      verb.base, verb.simple, verb.participle, FORMAT_RULES, avoid
    ),
    HintContext::Quiz => format!(
      "Create one simple, single-sentence trick for a student to remember that \"{}\" changes to \"{}\" and \"{}\".\n{}\nReturn ONLY a JSON object: {{\"hint\": \"the single sentence trick\"}}.{}",
      verb.base, verb.simple, verb.participle, FORMAT_RULES, avoid
    ),
  }
}
