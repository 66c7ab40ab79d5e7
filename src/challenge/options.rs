//! Multiple-choice option generation for drill challenges.

use rand::seq::SliceRandom;
use rand::Rng;

use super::ChallengeError;
use crate::config;
use crate::domain::DrillSlot;

/// Generated multiple-choice options for one drill slot
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSet {
  pub word_ref_id: String,
  /// Exactly four distinct strings, the slot's word among them
  pub options: Vec<String>,
}

/// Generate one option set per drill slot.
///
/// Each set holds the slot's own word plus three distractors sampled
/// without replacement from the distinct other words of the drill, then
/// shuffled. A slot with fewer than three distinct other words is an
/// error; the drill data cannot support a four-way question.
///
/// The random source is supplied by the caller, so tests can pin a seed.
pub fn build_option_sets<R: Rng + ?Sized>(
  slots: &[DrillSlot],
  rng: &mut R,
) -> Result<Vec<OptionSet>, ChallengeError> {
  slots
    .iter()
    .map(|slot| {
      let options = generate_options(slot, slots, rng)?;
      Ok(OptionSet {
        word_ref_id: slot.word_ref_id.clone(),
        options,
      })
    })
    .collect()
}

/// Build the four options for a single slot
fn generate_options<R: Rng + ?Sized>(
  slot: &DrillSlot,
  all_slots: &[DrillSlot],
  rng: &mut R,
) -> Result<Vec<String>, ChallengeError> {
  let correct = slot.word.clone();

  // Candidate distractors: every other slot's word, minus anything equal
  // to the target word
  let mut distractors: Vec<String> = all_slots
    .iter()
    .filter(|s| s.word_ref_id != slot.word_ref_id && s.word != correct)
    .map(|s| s.word.clone())
    .collect();

  // Dedup before the feasibility check; duplicates must not count
  // toward the three distinct distractors
  distractors.sort();
  distractors.dedup();

  if distractors.len() < config::DISTRACTOR_COUNT {
    return Err(ChallengeError::NotEnoughDistractors {
      word: correct,
      have: distractors.len(),
    });
  }

  distractors.shuffle(rng);
  distractors.truncate(config::DISTRACTOR_COUNT);

  // Combine correct answer with distractors
  let mut options = vec![correct];
  options.extend(distractors);

  // Shuffle final options
  options.shuffle(rng);

  Ok(options)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn slot(set_ref_id: &str, word_ref_id: &str, word: &str) -> DrillSlot {
    DrillSlot {
      set_ref_id: set_ref_id.to_string(),
      word_ref_id: word_ref_id.to_string(),
      word: word.to_string(),
    }
  }

  fn four_word_drill() -> Vec<DrillSlot> {
    vec![
      slot("a", "w1", "cat"),
      slot("b", "w2", "dog"),
      slot("c", "w3", "bird"),
      slot("d", "w4", "fish"),
    ]
  }

  #[test]
  fn test_option_sets_contain_correct_word_exactly_once() {
    let slots = four_word_drill();
    let mut rng = StdRng::seed_from_u64(1);

    let sets = build_option_sets(&slots, &mut rng).unwrap();

    assert_eq!(sets.len(), 4);
    for (set, slot) in sets.iter().zip(&slots) {
      assert_eq!(set.word_ref_id, slot.word_ref_id);
      let matches = set.options.iter().filter(|o| **o == slot.word).count();
      assert_eq!(matches, 1, "correct word must appear exactly once");
    }
  }

  #[test]
  fn test_option_sets_have_four_distinct_options() {
    let slots = four_word_drill();
    let mut rng = StdRng::seed_from_u64(2);

    let sets = build_option_sets(&slots, &mut rng).unwrap();

    for set in &sets {
      assert_eq!(set.options.len(), 4);
      let mut sorted = set.options.clone();
      sorted.sort();
      sorted.dedup();
      assert_eq!(sorted.len(), 4, "options must be pairwise distinct");
    }
  }

  #[test]
  fn test_distractors_come_from_other_drill_words() {
    let slots = four_word_drill();
    let mut rng = StdRng::seed_from_u64(3);

    let sets = build_option_sets(&slots, &mut rng).unwrap();

    // cat's set holds cat plus exactly 3 of {dog, bird, fish}
    let cat_set = &sets[0];
    assert!(cat_set.options.contains(&"cat".to_string()));
    for option in &cat_set.options {
      assert!(["cat", "dog", "bird", "fish"].contains(&option.as_str()));
    }
  }

  #[test]
  fn test_three_word_drill_errors_instead_of_hanging() {
    let slots = vec![
      slot("a", "w1", "cat"),
      slot("b", "w2", "dog"),
      slot("c", "w3", "bird"),
    ];
    let mut rng = StdRng::seed_from_u64(4);

    let err = build_option_sets(&slots, &mut rng).unwrap_err();

    assert_eq!(
      err,
      ChallengeError::NotEnoughDistractors {
        word: "cat".to_string(),
        have: 2,
      }
    );
  }

  #[test]
  fn test_duplicate_words_shrink_the_candidate_pool() {
    // Four slots but only three distinct strings: no slot has three
    // distinct other words to draw from
    let slots = vec![
      slot("a", "w1", "cat"),
      slot("b", "w2", "cat"),
      slot("c", "w3", "dog"),
      slot("d", "w4", "bird"),
    ];
    let mut rng = StdRng::seed_from_u64(5);

    let err = build_option_sets(&slots, &mut rng).unwrap_err();

    assert!(matches!(
      err,
      ChallengeError::NotEnoughDistractors { have: 2, .. }
    ));
  }

  #[test]
  fn test_duplicate_target_words_still_work_with_enough_others() {
    // Both cat slots get a set; the other cat never counts as a distractor
    let slots = vec![
      slot("a", "w1", "cat"),
      slot("b", "w2", "cat"),
      slot("c", "w3", "dog"),
      slot("d", "w4", "bird"),
      slot("e", "w5", "fish"),
    ];
    let mut rng = StdRng::seed_from_u64(6);

    let sets = build_option_sets(&slots, &mut rng).unwrap();

    assert_eq!(sets.len(), 5);
    for set in &sets[..2] {
      let cats = set.options.iter().filter(|o| o.as_str() == "cat").count();
      assert_eq!(cats, 1);
    }
  }

  #[test]
  fn test_empty_input_yields_no_sets() {
    let mut rng = StdRng::seed_from_u64(7);
    let sets = build_option_sets(&[], &mut rng).unwrap();
    assert!(sets.is_empty());
  }

  #[test]
  fn test_same_seed_gives_same_sets() {
    let slots = four_word_drill();

    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);

    let sets_a = build_option_sets(&slots, &mut rng_a).unwrap();
    let sets_b = build_option_sets(&slots, &mut rng_b).unwrap();

    assert_eq!(sets_a, sets_b);
  }

  #[test]
  fn test_correct_position_is_roughly_uniform() {
    let slots = four_word_drill();
    let mut rng = StdRng::seed_from_u64(99);
    let runs = 1000;

    let mut position_counts = [0usize; 4];
    for _ in 0..runs {
      let sets = build_option_sets(&slots, &mut rng).unwrap();
      let position = sets[0]
        .options
        .iter()
        .position(|o| o == "cat")
        .expect("correct word must be present");
      position_counts[position] += 1;
    }

    // Expected 250 per position; a heavily skewed shuffle would push at
    // least one bucket far below that
    assert_eq!(position_counts.iter().sum::<usize>(), runs);
    for (position, count) in position_counts.iter().enumerate() {
      assert!(
        *count > 150,
        "position {} drawn only {} times in {} runs",
        position,
        count,
        runs
      );
    }
  }
}
