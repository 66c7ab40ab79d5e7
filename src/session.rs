//! In-memory storage for challenge sessions.
//!
//! A session holds everything the challenge page needs between form
//! posts: the joined slots, the generated options, the response sheet,
//! and the card colors. Sessions auto-expire after a configurable
//! duration of inactivity.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::challenge::{OptionSet, ResponseSheet};
use crate::config;
use crate::domain::DrillSlot;

/// Server-side state for one user's run at a challenge
#[derive(Debug, Clone)]
pub struct ChallengeSession {
  pub drill_set_ref_id: String,
  pub challenge_ref_id: String,
  /// Joined drill slots, in set order
  pub slots: Vec<DrillSlot>,
  /// One option set per slot, index-aligned with `slots`
  pub option_sets: Vec<OptionSet>,
  pub sheet: ResponseSheet,
  /// One CSS color class per slot
  pub card_colors: Vec<String>,
  /// Whether a submission has already succeeded
  pub submitted: bool,
}

/// Session entry with last access time for expiration
struct SessionEntry {
  session: ChallengeSession,
  last_access: DateTime<Utc>,
}

/// Shared session store, cloned into the application state
#[derive(Clone, Default)]
pub struct ChallengeSessions {
  inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl ChallengeSessions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Store a new session under a fresh id
  pub async fn insert(&self, session: ChallengeSession) -> String {
    let mut sessions = self.inner.write().await;

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut sessions);
    }

    let session_id = generate_session_id();
    sessions.insert(
      session_id.clone(),
      SessionEntry {
        session,
        last_access: Utc::now(),
      },
    );
    session_id
  }

  /// Look up a session, refreshing its last access time.
  ///
  /// Expired sessions are dropped and reported as missing.
  pub async fn get(&self, session_id: &str) -> Option<ChallengeSession> {
    let mut sessions = self.inner.write().await;

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut sessions);
    }

    if let Some(entry) = sessions.get_mut(session_id) {
      let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
      if entry.last_access > expiry {
        entry.last_access = Utc::now();
        return Some(entry.session.clone());
      }
    }

    sessions.remove(session_id);
    None
  }

  /// Replace a session's state
  pub async fn update(&self, session_id: &str, session: ChallengeSession) {
    let mut sessions = self.inner.write().await;
    sessions.insert(
      session_id.to_string(),
      SessionEntry {
        session,
        last_access: Utc::now(),
      },
    );
  }

  /// Number of stored sessions
  pub async fn count(&self) -> usize {
    self.inner.read().await.len()
  }
}

/// Clean up expired sessions
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>) {
  let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
  sessions.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_session() -> ChallengeSession {
    ChallengeSession {
      drill_set_ref_id: "ds-1".to_string(),
      challenge_ref_id: "ch-1".to_string(),
      slots: vec![],
      option_sets: vec![],
      sheet: ResponseSheet::new("ch-1", &[]),
      card_colors: vec![],
      submitted: false,
    }
  }

  #[test]
  fn test_generate_session_id_shape() {
    let id = generate_session_id();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
  }

  #[test]
  fn test_generate_session_id_varies() {
    assert_ne!(generate_session_id(), generate_session_id());
  }

  #[tokio::test]
  async fn test_insert_then_get() {
    let store = ChallengeSessions::new();

    let session_id = store.insert(sample_session()).await;
    let session = store.get(&session_id).await.expect("session must exist");

    assert_eq!(session.challenge_ref_id, "ch-1");
    assert_eq!(store.count().await, 1);
  }

  #[tokio::test]
  async fn test_get_unknown_id_is_none() {
    let store = ChallengeSessions::new();
    assert!(store.get("nope").await.is_none());
  }

  #[tokio::test]
  async fn test_update_replaces_state() {
    let store = ChallengeSessions::new();
    let session_id = store.insert(sample_session()).await;

    let mut session = store.get(&session_id).await.unwrap();
    session.submitted = true;
    store.update(&session_id, session).await;

    assert!(store.get(&session_id).await.unwrap().submitted);
    assert_eq!(store.count().await, 1);
  }

  #[tokio::test]
  async fn test_expired_session_is_dropped_on_lookup() {
    let store = ChallengeSessions::new();
    let session_id = store.insert(sample_session()).await;

    {
      let mut sessions = store.inner.write().await;
      let entry = sessions.get_mut(&session_id).unwrap();
      entry.last_access = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS + 1);
    }

    assert!(store.get(&session_id).await.is_none());
    assert_eq!(store.count().await, 0);
  }

  #[tokio::test]
  async fn test_cleanup_drops_only_expired_entries() {
    let store = ChallengeSessions::new();
    let stale_id = store.insert(sample_session()).await;
    let fresh_id = store.insert(sample_session()).await;

    {
      let mut sessions = store.inner.write().await;
      let entry = sessions.get_mut(&stale_id).unwrap();
      entry.last_access = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS + 1);
      cleanup_expired(&mut sessions);
    }

    assert_eq!(store.count().await, 1);
    assert!(store.get(&fresh_id).await.is_some());
  }
}
