//! Flashcard study deck.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::content::all_verbs;
use crate::domain::Verb;

/// A shuffled pass over every verb with a wrapping cursor
#[derive(Debug, Clone)]
pub struct StudyDeck {
  cards: Vec<Verb>,
  position: usize,
  /// Verbs the player asked a hint for
  discovered: HashSet<&'static str>,
}

/// Card currently shown, with deck progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyCard {
  pub verb: Verb,
  pub position: usize,
  pub total: usize,
  pub learned_count: usize,
  pub discovered: bool,
}

impl StudyDeck {
  pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
    let mut cards = all_verbs().to_vec();
    cards.shuffle(rng);
    Self::from_cards(cards)
  }

  pub fn from_cards(cards: Vec<Verb>) -> Self {
    Self {
      cards,
      position: 0,
      discovered: HashSet::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.cards.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  pub fn current(&self) -> Option<StudyCard> {
    let verb = *self.cards.get(self.position)?;
    Some(StudyCard {
      verb,
      position: self.position,
      total: self.cards.len(),
      learned_count: self.learned_count(),
      discovered: self.discovered.contains(verb.base),
    })
  }

  pub fn next(&mut self) -> Option<StudyCard> {
    if self.cards.is_empty() {
      return None;
    }
    self.position = (self.position + 1) % self.cards.len();
    self.current()
  }

  pub fn prev(&mut self) -> Option<StudyCard> {
    if self.cards.is_empty() {
      return None;
    }
    self.position = (self.position + self.cards.len() - 1) % self.cards.len();
    self.current()
  }

  /// Mark a verb of this deck as learned; unknown verbs are ignored
  pub fn discover(&mut self, base: &str) -> bool {
    match self.cards.iter().find(|v| v.base == base) {
      Some(verb) => {
        self.discovered.insert(verb.base);
        true
      }
      None => false,
    }
  }

  pub fn learned_count(&self) -> usize {
    self.discovered.len()
  }
}
