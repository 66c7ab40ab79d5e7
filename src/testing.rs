//! Test utilities for exercising the drill API client and handlers.
//!
//! Provides an in-process stand-in for the drill metadata and scoring
//! services, plus small fixture builders, so tests talk to a real HTTP
//! endpoint without any external service running.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::domain::{DataEnvelope, DrillSetItem, WordItem};

/// Handle to a spawned drill service stand-in
pub struct DrillStub {
  /// Base URL the stub listens on, e.g. `http://127.0.0.1:41234`
  pub base_url: String,
  /// Every score payload the stub has received, in arrival order
  pub received_scores: Arc<Mutex<Vec<Value>>>,
}

/// Failure switches for the stub endpoints
#[derive(Clone, Default)]
pub struct StubBehavior {
  /// Answer both metadata endpoints with a 500
  pub fail_metadata: bool,
  /// Record the score payload but answer with a 500
  pub fail_scores: bool,
}

#[derive(Clone)]
struct StubState {
  items: Vec<DrillSetItem>,
  words: Vec<WordItem>,
  behavior: StubBehavior,
  received_scores: Arc<Mutex<Vec<Value>>>,
}

/// Spawn a drill service stand-in on an ephemeral local port.
///
/// The stub serves the given items and words for any drill set ref id
/// and records every score submission it receives.
pub async fn spawn_drill_stub(
  items: Vec<DrillSetItem>,
  words: Vec<WordItem>,
  behavior: StubBehavior,
) -> DrillStub {
  let received_scores = Arc::new(Mutex::new(Vec::new()));
  let state = StubState {
    items,
    words,
    behavior,
    received_scores: received_scores.clone(),
  };

  let app = Router::new()
    .route("/drill/metadata/sets/{drill_set_ref_id}", get(stub_drill_set))
    .route(
      "/drill/metadata/sets/words/data/{drill_set_ref_id}",
      get(stub_drill_words),
    )
    .route(
      "/drill/metadata/challenges/challenge/{challenge_id}/scores",
      put(stub_scores),
    )
    .with_state(state);

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
    .await
    .expect("failed to bind stub listener");
  let addr = listener.local_addr().expect("stub listener has no address");
  tokio::spawn(async move {
    axum::serve(listener, app).await.expect("stub server failed");
  });

  DrillStub {
    base_url: format!("http://{}", addr),
    received_scores,
  }
}

async fn stub_drill_set(
  State(state): State<StubState>,
  Path(_drill_set_ref_id): Path<String>,
) -> (StatusCode, Json<Value>) {
  if state.behavior.fail_metadata {
    return (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(json!({ "message": "drill metadata unavailable" })),
    );
  }
  let envelope = DataEnvelope { data: state.items };
  (StatusCode::OK, Json(json!(envelope)))
}

async fn stub_drill_words(
  State(state): State<StubState>,
  Path(_drill_set_ref_id): Path<String>,
) -> (StatusCode, Json<Value>) {
  if state.behavior.fail_metadata {
    return (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(json!({ "message": "drill metadata unavailable" })),
    );
  }
  let envelope = DataEnvelope { data: state.words };
  (StatusCode::OK, Json(json!(envelope)))
}

async fn stub_scores(
  State(state): State<StubState>,
  Path(_challenge_id): Path<String>,
  Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
  // Recorded even on failure so tests can compare retry payloads
  state
    .received_scores
    .lock()
    .expect("stub score log poisoned")
    .push(body);

  if state.behavior.fail_scores {
    return (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(json!({ "message": "scoring backend unavailable" })),
    );
  }
  (StatusCode::OK, Json(json!({ "status": "ok" })))
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn sample_word(ref_id: &str, word: &str) -> WordItem {
  WordItem {
    ref_id: ref_id.to_string(),
    word: word.to_string(),
  }
}

pub fn sample_item(ref_id: &str, word_ref_id: &str) -> DrillSetItem {
  DrillSetItem {
    ref_id: ref_id.to_string(),
    word_ref_id: word_ref_id.to_string(),
  }
}

/// Four-word drill set: cat, dog, bird, fish
pub fn sample_drill() -> (Vec<DrillSetItem>, Vec<WordItem>) {
  let items = vec![
    sample_item("a", "w1"),
    sample_item("b", "w2"),
    sample_item("c", "w3"),
    sample_item("d", "w4"),
  ];
  let words = vec![
    sample_word("w1", "cat"),
    sample_word("w2", "dog"),
    sample_word("w3", "bird"),
    sample_word("w4", "fish"),
  ];
  (items, words)
}
