//! Application configuration constants.
//!
//! This module centralizes all configurable values so that nothing is
//! hardcoded at the call sites.

use serde::Deserialize;

// ==================== Drill API Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
  drill_api: Option<DrillApiConfig>,
}

#[derive(Debug, Deserialize)]
struct DrillApiConfig {
  base_url: Option<String>,
  timeout_secs: Option<u64>,
}

/// Default location of the drill metadata and scoring service
pub const DEFAULT_DRILL_API_BASE_URL: &str = "http://localhost:8080";

/// Default request timeout for drill service calls, in seconds
pub const DEFAULT_DRILL_API_TIMEOUT_SECS: u64 = 20;

/// Resolved drill API settings
#[derive(Debug, Clone)]
pub struct DrillApiSettings {
  pub base_url: String,
  pub timeout_secs: u64,
}

/// Load drill API settings with priority: config.toml > .env > default
pub fn load_drill_api_settings() -> DrillApiSettings {
  // Load .env file if present
  let _ = dotenvy::dotenv();

  let from_file = read_config_file();

  let base_url = if let Some(url) = from_file.as_ref().and_then(|c| c.base_url.clone()) {
    tracing::info!("Using drill API base URL from config.toml: {}", url);
    url
  } else if let Ok(url) = std::env::var("DRILL_API_BASE_URL") {
    tracing::info!("Using drill API base URL from DRILL_API_BASE_URL env: {}", url);
    url
  } else {
    tracing::info!(
      "Using default drill API base URL: {}",
      DEFAULT_DRILL_API_BASE_URL
    );
    DEFAULT_DRILL_API_BASE_URL.to_string()
  };

  let timeout_secs = from_file
    .as_ref()
    .and_then(|c| c.timeout_secs)
    .or_else(|| {
      std::env::var("DRILL_API_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
    })
    .unwrap_or(DEFAULT_DRILL_API_TIMEOUT_SECS);

  DrillApiSettings {
    base_url,
    timeout_secs,
  }
}

fn read_config_file() -> Option<DrillApiConfig> {
  let contents = std::fs::read_to_string("config.toml").ok()?;
  match toml::from_str::<AppConfig>(&contents) {
    Ok(config) => config.drill_api,
    Err(e) => {
      tracing::warn!("Ignoring malformed config.toml: {}", e);
      None
    }
  }
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Get the full server bind address
pub fn server_bind_addr() -> String {
  format!("{}:{}", SERVER_ADDR, SERVER_PORT)
}

// ==================== Session Configuration ====================

/// Session expiration time in hours
pub const SESSION_EXPIRY_HOURS: i64 = 1;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

// ==================== Challenge Configuration ====================

/// Number of options shown per drill question
pub const OPTION_COUNT: usize = 4;

/// Number of distractor options per drill question
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;
