//! Template and form structs for the challenge pages.

use askama::Template;
use serde::Deserialize;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {}

/// One selectable answer within a question card
pub struct OptionView {
  pub value: String,
  pub is_selected: bool,
}

/// One question card on the challenge page
pub struct SlotView {
  /// Position in the response sheet, posted back on selection
  pub index: usize,
  /// 1-based display number
  pub number: usize,
  pub word: String,
  pub color_class: String,
  pub answered: bool,
  pub options: Vec<OptionView>,
}

#[derive(Template)]
#[template(path = "challenge.html")]
pub struct ChallengeTemplate {
  pub session_id: String,
  pub drill_set_ref_id: String,
  pub challenge_ref_id: String,
  pub slots: Vec<SlotView>,
  pub answered_count: usize,
  pub total_count: usize,
  pub submitted: bool,
  // Submission outcome banner
  pub has_notice: bool,
  pub notice_success: bool,
  pub notice_message: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
  pub title: String,
  pub message: String,
}

// ============================================================================
// Form Structs
// ============================================================================

#[derive(Deserialize)]
pub struct ChallengeQuery {
  #[serde(default)]
  pub drill_set_ref_id: String,
  #[serde(default)]
  pub challenge_ref_id: String,
}

#[derive(Deserialize)]
pub struct SelectForm {
  pub session_id: String,
  pub slot_index: usize,
  #[serde(default)]
  pub choice: String,
}

#[derive(Deserialize)]
pub struct SubmitForm {
  pub session_id: String,
}
