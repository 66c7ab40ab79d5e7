//! Challenge assembly: joining drill data, generating option sets, and
//! tracking the user's responses.

mod options;
mod responses;

use std::collections::HashMap;

use crate::config;
use crate::domain::{DrillSetItem, DrillSlot, WordItem};

pub use options::{build_option_sets, OptionSet};
pub use responses::ResponseSheet;

/// Error building a challenge from drill data
#[derive(Debug, Clone, PartialEq)]
pub enum ChallengeError {
  /// A drill slot references a word ref id missing from the word inventory
  UnknownWordRef {
    set_ref_id: String,
    word_ref_id: String,
  },
  /// Too few distinct other words to draw distractors for the given word
  NotEnoughDistractors { word: String, have: usize },
}

impl std::fmt::Display for ChallengeError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::UnknownWordRef {
        set_ref_id,
        word_ref_id,
      } => write!(
        f,
        "drill slot {} references unknown word {}",
        set_ref_id, word_ref_id
      ),
      Self::NotEnoughDistractors { word, have } => write!(
        f,
        "not enough distinct words to build options for \"{}\" (need {}, have {})",
        word,
        config::DISTRACTOR_COUNT,
        have
      ),
    }
  }
}

impl std::error::Error for ChallengeError {}

/// Pair every drill slot with its word by ref id.
///
/// The word inventory order is irrelevant; a slot whose `word_ref_id` has
/// no matching word is an error, not a skip.
pub fn join_drill_slots(
  items: &[DrillSetItem],
  words: &[WordItem],
) -> Result<Vec<DrillSlot>, ChallengeError> {
  let by_ref: HashMap<&str, &WordItem> = words.iter().map(|w| (w.ref_id.as_str(), w)).collect();

  items
    .iter()
    .map(|item| {
      let word = by_ref
        .get(item.word_ref_id.as_str())
        .ok_or_else(|| ChallengeError::UnknownWordRef {
          set_ref_id: item.ref_id.clone(),
          word_ref_id: item.word_ref_id.clone(),
        })?;
      Ok(DrillSlot {
        set_ref_id: item.ref_id.clone(),
        word_ref_id: item.word_ref_id.clone(),
        word: word.word.clone(),
      })
    })
    .collect()
}
