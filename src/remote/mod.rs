//! HTTP client for the external drill metadata and scoring service.
//!
//! All persistence and grading lives behind these three endpoints; this
//! side only fetches drill data and pushes score sheets back.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::domain::{DataEnvelope, DrillSetItem, ResponseRecord, WordItem};

/// Error talking to the drill service
#[derive(Debug)]
pub enum ApiError {
  /// The request never completed (connect failure, timeout, broken body)
  Transport(reqwest::Error),
  /// The service answered with a non-success status
  Status { status: StatusCode, detail: String },
  /// The service answered 2xx but the payload had an unexpected shape
  Decode(serde_json::Error),
}

impl std::fmt::Display for ApiError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Transport(e) => write!(f, "drill service unreachable: {}", e),
      Self::Status { status, detail } => {
        write!(f, "drill service returned {}: {}", status, detail)
      }
      Self::Decode(e) => write!(f, "drill service sent an unexpected response: {}", e),
    }
  }
}

impl std::error::Error for ApiError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Transport(e) => Some(e),
      Self::Decode(e) => Some(e),
      Self::Status { .. } => None,
    }
  }
}

/// Client for the drill metadata and scoring endpoints
#[derive(Clone)]
pub struct DrillService {
  client: reqwest::Client,
  base_url: String,
}

impl DrillService {
  pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .build()
      .map_err(ApiError::Transport)?;

    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  /// Fetch the slots of a drill set
  pub async fn fetch_drill_set(
    &self,
    drill_set_ref_id: &str,
  ) -> Result<Vec<DrillSetItem>, ApiError> {
    let url = format!("{}/drill/metadata/sets/{}", self.base_url, drill_set_ref_id);
    let body = self.get_body(&url).await?;
    let envelope: DataEnvelope<DrillSetItem> =
      serde_json::from_str(&body).map_err(ApiError::Decode)?;

    tracing::debug!(
      "Fetched {} slots for drill set {}",
      envelope.data.len(),
      drill_set_ref_id
    );
    Ok(envelope.data)
  }

  /// Fetch the word inventory of a drill set
  pub async fn fetch_drill_words(&self, drill_set_ref_id: &str) -> Result<Vec<WordItem>, ApiError> {
    let url = format!(
      "{}/drill/metadata/sets/words/data/{}",
      self.base_url, drill_set_ref_id
    );
    let body = self.get_body(&url).await?;
    let envelope: DataEnvelope<WordItem> =
      serde_json::from_str(&body).map_err(ApiError::Decode)?;

    tracing::debug!(
      "Fetched {} words for drill set {}",
      envelope.data.len(),
      drill_set_ref_id
    );
    Ok(envelope.data)
  }

  /// Replace all scores for a challenge with the given records.
  ///
  /// The endpoint upserts by challenge id, so resending the same sheet is
  /// harmless. The acknowledgement body is not interpreted; any 2xx
  /// status counts as success.
  pub async fn submit_scores(
    &self,
    challenge_ref_id: &str,
    records: &[ResponseRecord],
  ) -> Result<(), ApiError> {
    let url = format!(
      "{}/drill/metadata/challenges/challenge/{}/scores",
      self.base_url, challenge_ref_id
    );

    let res = self
      .client
      .put(&url)
      .header(CONTENT_TYPE, "application/json")
      .json(records)
      .send()
      .await
      .map_err(ApiError::Transport)?;

    if !res.status().is_success() {
      return Err(status_error(res).await);
    }

    tracing::debug!(
      "Submitted {} score records for challenge {}",
      records.len(),
      challenge_ref_id
    );
    Ok(())
  }

  async fn get_body(&self, url: &str) -> Result<String, ApiError> {
    let res = self.client.get(url).send().await.map_err(ApiError::Transport)?;

    if !res.status().is_success() {
      return Err(status_error(res).await);
    }

    res.text().await.map_err(ApiError::Transport)
  }
}

/// Turn a non-success response into a Status error with a usable detail
async fn status_error(res: reqwest::Response) -> ApiError {
  let status = res.status();
  let body = res.text().await.unwrap_or_default();
  let detail = extract_error_detail(&body).unwrap_or_else(|| {
    let trimmed = body.trim();
    if trimmed.is_empty() {
      status.canonical_reason().unwrap_or("no response body").to_string()
    } else {
      trimmed.chars().take(200).collect()
    }
  });

  ApiError::Status { status, detail }
}

/// Pull a human-readable message out of a JSON error body, if there is one
fn extract_error_detail(body: &str) -> Option<String> {
  let value: serde_json::Value = serde_json::from_str(body).ok()?;
  if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
    return Some(message.to_string());
  }
  match value.get("error")? {
    serde_json::Value::String(s) => Some(s.clone()),
    other => other
      .get("message")
      .and_then(|v| v.as_str())
      .map(|s| s.to_string()),
  }
}
