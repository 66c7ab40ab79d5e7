use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leximentor::{config, handlers, remote::DrillService, state::AppState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "leximentor=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let api = config::load_drill_api_settings();
  let drill = DrillService::new(&api.base_url, api.timeout_secs)
    .expect("Failed to build drill API client");

  let app = handlers::build_router(AppState::new(drill));

  let bind_addr = config::server_bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", config::SERVER_PORT);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
