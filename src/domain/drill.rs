//! Wire types for the external drill metadata and scoring service.
//!
//! Field names follow the service's JSON contract (camelCase), so these
//! types deserialize the remote payloads directly.

use serde::{Deserialize, Serialize};

/// One vocabulary word eligible for a drill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordItem {
  /// Opaque identifier, unique within a drill set
  pub ref_id: String,
  /// Display string shown to the user
  pub word: String,
}

/// One slot in a drill set, pointing at its word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillSetItem {
  pub ref_id: String,
  pub word_ref_id: String,
}

/// The user's answer for one drill slot, as sent to the scoring endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
  /// Ref id of the drill slot this answer belongs to
  pub drill_set_ref_id: String,
  /// Ref id of the scored challenge attempt
  pub drill_challenge_ref_id: String,
  /// The chosen option string, empty until the user answers
  pub response: String,
}

/// List payload wrapper used by the drill metadata endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
  pub data: Vec<T>,
}

/// A drill slot resolved to its word
///
/// Produced by joining DrillSetItem and WordItem collections on
/// `word_ref_id`, never by positional alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillSlot {
  pub set_ref_id: String,
  pub word_ref_id: String,
  pub word: String,
}
