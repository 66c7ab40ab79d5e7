//! Response sheet for a challenge: one record per drill slot, filled in
//! as the user answers and sent in bulk to the scoring endpoint.

use crate::domain::{DrillSlot, ResponseRecord};

/// All response records for one challenge attempt.
///
/// Updates are immutable: `select` returns a new sheet, so a failed
/// submission can never leave the records half-changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSheet {
  records: Vec<ResponseRecord>,
}

impl ResponseSheet {
  /// Build one empty record per drill slot
  pub fn new(challenge_ref_id: &str, slots: &[DrillSlot]) -> Self {
    let records = slots
      .iter()
      .map(|slot| ResponseRecord {
        drill_set_ref_id: slot.set_ref_id.clone(),
        drill_challenge_ref_id: challenge_ref_id.to_string(),
        response: String::new(),
      })
      .collect();

    Self { records }
  }

  /// Return a new sheet with the given slot's response replaced.
  ///
  /// The chosen value is not validated against the slot's option set; the
  /// form only ever offers generated options. An out-of-range index
  /// leaves the sheet unchanged.
  pub fn select(&self, slot_index: usize, value: &str) -> Self {
    let mut records = self.records.clone();
    if let Some(record) = records.get_mut(slot_index) {
      record.response = value.to_string();
    }
    Self { records }
  }

  /// All records, in slot order
  pub fn records(&self) -> &[ResponseRecord] {
    &self.records
  }

  /// The response recorded for a slot, if the index is valid
  pub fn response_at(&self, slot_index: usize) -> Option<&str> {
    self.records.get(slot_index).map(|r| r.response.as_str())
  }

  /// How many slots have a non-empty response
  pub fn answered_count(&self) -> usize {
    self.records.iter().filter(|r| !r.response.is_empty()).count()
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn slot(set_ref_id: &str, word_ref_id: &str, word: &str) -> DrillSlot {
    DrillSlot {
      set_ref_id: set_ref_id.to_string(),
      word_ref_id: word_ref_id.to_string(),
      word: word.to_string(),
    }
  }

  fn sample_slots() -> Vec<DrillSlot> {
    vec![
      slot("a", "w1", "cat"),
      slot("b", "w2", "dog"),
      slot("c", "w3", "bird"),
    ]
  }

  #[test]
  fn test_new_sheet_has_one_empty_record_per_slot() {
    let sheet = ResponseSheet::new("ch-1", &sample_slots());

    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet.answered_count(), 0);
    for record in sheet.records() {
      assert_eq!(record.drill_challenge_ref_id, "ch-1");
      assert!(record.response.is_empty());
    }
    assert_eq!(sheet.records()[0].drill_set_ref_id, "a");
    assert_eq!(sheet.records()[2].drill_set_ref_id, "c");
  }

  #[test]
  fn test_select_sets_only_the_given_slot() {
    let sheet = ResponseSheet::new("ch-1", &sample_slots());

    let updated = sheet.select(1, "dog");

    assert_eq!(updated.response_at(0), Some(""));
    assert_eq!(updated.response_at(1), Some("dog"));
    assert_eq!(updated.response_at(2), Some(""));
    assert_eq!(updated.answered_count(), 1);
  }

  #[test]
  fn test_select_does_not_mutate_the_original() {
    let sheet = ResponseSheet::new("ch-1", &sample_slots());

    let _updated = sheet.select(0, "cat");

    assert_eq!(sheet.response_at(0), Some(""));
    assert_eq!(sheet.answered_count(), 0);
  }

  #[test]
  fn test_select_replaces_a_previous_answer() {
    let sheet = ResponseSheet::new("ch-1", &sample_slots());

    let updated = sheet.select(0, "dog").select(0, "cat");

    assert_eq!(updated.response_at(0), Some("cat"));
    assert_eq!(updated.answered_count(), 1);
  }

  #[test]
  fn test_select_out_of_range_is_a_noop() {
    let sheet = ResponseSheet::new("ch-1", &sample_slots());

    let updated = sheet.select(99, "cat");

    assert_eq!(updated, sheet);
  }

  #[test]
  fn test_serialization_is_stable_across_calls() {
    let sheet = ResponseSheet::new("ch-1", &sample_slots()).select(0, "cat");

    let first = serde_json::to_string(sheet.records()).unwrap();
    let second = serde_json::to_string(sheet.records()).unwrap();

    assert_eq!(first, second);
  }

  #[test]
  fn test_empty_sheet() {
    let sheet = ResponseSheet::new("ch-1", &[]);

    assert!(sheet.is_empty());
    assert_eq!(sheet.answered_count(), 0);
    assert_eq!(sheet.response_at(0), None);
  }
}
