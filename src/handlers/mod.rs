//! HTTP handlers and router assembly.

pub mod challenge;
mod templates;

use askama::Template;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use templates::{ErrorTemplate, IndexTemplate};

pub use challenge::{challenge_select, challenge_start, challenge_submit};
pub use templates::{ChallengeQuery, SelectForm, SubmitForm};

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
  /// Log the error at warn level and return the default
  fn log_warn_default(self, context: &str) -> T
  where
    T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for Result<T, E> {
  fn log_warn_default(self, context: &str) -> T
  where
    T: Default,
  {
    match self {
      Ok(v) => v,
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        T::default()
      }
    }
  }
}

/// Build the application router with all routes and shared state
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/challenge", get(challenge_start))
    .route("/challenge/select", post(challenge_select))
    .route("/challenge/submit", post(challenge_submit))
    .nest_service("/static", ServeDir::new("static"))
    .with_state(state)
    .layer(TraceLayer::new_for_http())
}

/// Landing page with the challenge start form
pub async fn index() -> Html<String> {
  Html(
    IndexTemplate {}
      .render()
      .log_warn_default("Failed to render index page"),
  )
}

/// Render a full-page error notice
fn error_page(title: &str, message: String) -> Html<String> {
  let template = ErrorTemplate {
    title: title.to_string(),
    message,
  };
  Html(template.render().log_warn_default("Failed to render error page"))
}
