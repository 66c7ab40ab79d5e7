//! Challenge page handlers: load a drill, record picks, submit scores.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Form;

use crate::challenge::{self, build_option_sets, ResponseSheet};
use crate::palette::CardPalette;
use crate::session::ChallengeSession;
use crate::state::AppState;

use super::templates::{
  ChallengeQuery, ChallengeTemplate, OptionView, SelectForm, SlotView, SubmitForm,
};
use super::{error_page, LogOnError};

/// Submission outcome shown at the top of the challenge page
struct Notice {
  success: bool,
  message: String,
}

/// Load a drill set, build its option sets, and open a fresh session
pub async fn challenge_start(
  State(state): State<AppState>,
  Query(query): Query<ChallengeQuery>,
) -> Html<String> {
  let drill_set_ref_id = query.drill_set_ref_id.trim();
  let challenge_ref_id = query.challenge_ref_id.trim();

  if drill_set_ref_id.is_empty() || challenge_ref_id.is_empty() {
    return error_page(
      "Missing reference ids",
      "Both a drill set reference and a challenge reference are required.".to_string(),
    );
  }

  let items = match state.drill.fetch_drill_set(drill_set_ref_id).await {
    Ok(items) => items,
    Err(e) => {
      tracing::warn!("Failed to fetch drill set {}: {}", drill_set_ref_id, e);
      return error_page(
        "Drill service error",
        format!("Could not load the drill set: {}", e),
      );
    }
  };

  let words = match state.drill.fetch_drill_words(drill_set_ref_id).await {
    Ok(words) => words,
    Err(e) => {
      tracing::warn!(
        "Failed to fetch words for drill set {}: {}",
        drill_set_ref_id,
        e
      );
      return error_page(
        "Drill service error",
        format!("Could not load the drill words: {}", e),
      );
    }
  };

  let slots = match challenge::join_drill_slots(&items, &words) {
    Ok(slots) => slots,
    Err(e) => {
      tracing::warn!("Drill set {} has inconsistent data: {}", drill_set_ref_id, e);
      return error_page("Drill data problem", e.to_string());
    }
  };

  if slots.is_empty() {
    return error_page(
      "Empty drill set",
      format!("Drill set {} has no words to practice.", drill_set_ref_id),
    );
  }

  // ThreadRng is not Send and must not be held across the session insert await.
  let (option_sets, card_colors) = {
    let mut rng = rand::rng();

    let option_sets = match build_option_sets(&slots, &mut rng) {
      Ok(option_sets) => option_sets,
      Err(e) => {
        tracing::warn!(
          "Cannot build options for drill set {}: {}",
          drill_set_ref_id,
          e
        );
        return error_page("Drill data problem", e.to_string());
      }
    };

    let mut palette = CardPalette::new();
    let card_colors = slots
      .iter()
      .map(|_| palette.next(&mut rng).to_string())
      .collect();

    (option_sets, card_colors)
  };

  let session = ChallengeSession {
    drill_set_ref_id: drill_set_ref_id.to_string(),
    challenge_ref_id: challenge_ref_id.to_string(),
    sheet: ResponseSheet::new(challenge_ref_id, &slots),
    slots,
    option_sets,
    card_colors,
    submitted: false,
  };

  let session_id = state.sessions.insert(session.clone()).await;
  render_challenge(&session_id, &session, None)
}

/// Record one answer pick, leaving every other slot untouched
pub async fn challenge_select(
  State(state): State<AppState>,
  Form(form): Form<SelectForm>,
) -> Html<String> {
  let Some(session) = state.sessions.get(&form.session_id).await else {
    return session_expired_page();
  };

  // A save with nothing picked arrives without a choice field.
  if form.choice.is_empty() {
    return render_challenge(&form.session_id, &session, None);
  }

  let session = ChallengeSession {
    sheet: session.sheet.select(form.slot_index, &form.choice),
    ..session
  };

  state
    .sessions
    .update(&form.session_id, session.clone())
    .await;
  render_challenge(&form.session_id, &session, None)
}

/// Send the whole response sheet to the scoring endpoint.
///
/// On failure the sheet is left untouched so the user can submit again.
pub async fn challenge_submit(
  State(state): State<AppState>,
  Form(form): Form<SubmitForm>,
) -> Html<String> {
  let Some(session) = state.sessions.get(&form.session_id).await else {
    return session_expired_page();
  };

  match state
    .drill
    .submit_scores(&session.challenge_ref_id, session.sheet.records())
    .await
  {
    Ok(()) => {
      let session = ChallengeSession {
        submitted: true,
        ..session
      };
      state
        .sessions
        .update(&form.session_id, session.clone())
        .await;

      let notice = Notice {
        success: true,
        message: "Scores submitted successfully.".to_string(),
      };
      render_challenge(&form.session_id, &session, Some(notice))
    }
    Err(e) => {
      tracing::warn!(
        "Score submission for challenge {} failed: {}",
        session.challenge_ref_id,
        e
      );

      let notice = Notice {
        success: false,
        message: format!(
          "Submission failed: {}. Your answers are unchanged, you can submit again.",
          e
        ),
      };
      render_challenge(&form.session_id, &session, Some(notice))
    }
  }
}

fn render_challenge(
  session_id: &str,
  session: &ChallengeSession,
  notice: Option<Notice>,
) -> Html<String> {
  let (has_notice, notice_success, notice_message) = match notice {
    Some(notice) => (true, notice.success, notice.message),
    None => (false, false, String::new()),
  };

  let template = ChallengeTemplate {
    session_id: session_id.to_string(),
    drill_set_ref_id: session.drill_set_ref_id.clone(),
    challenge_ref_id: session.challenge_ref_id.clone(),
    slots: build_slot_views(session),
    answered_count: session.sheet.answered_count(),
    total_count: session.slots.len(),
    submitted: session.submitted,
    has_notice,
    notice_success,
    notice_message,
  };

  Html(
    template
      .render()
      .log_warn_default("Failed to render challenge page"),
  )
}

fn build_slot_views(session: &ChallengeSession) -> Vec<SlotView> {
  session
    .slots
    .iter()
    .zip(&session.option_sets)
    .enumerate()
    .map(|(index, (slot, option_set))| {
      let selected = session.sheet.response_at(index).unwrap_or("");
      let options = option_set
        .options
        .iter()
        .map(|value| OptionView {
          is_selected: !selected.is_empty() && value == selected,
          value: value.clone(),
        })
        .collect();

      SlotView {
        index,
        number: index + 1,
        word: slot.word.clone(),
        color_class: session.card_colors.get(index).cloned().unwrap_or_default(),
        answered: !selected.is_empty(),
        options,
      }
    })
    .collect()
}

fn session_expired_page() -> Html<String> {
  error_page(
    "Session expired",
    "This challenge session is no longer available. Start the challenge again from the home page."
      .to_string(),
  )
}
