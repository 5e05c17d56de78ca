use tower_http::trace::TraceLayer;

use verb_adventure::{config::AppConfig, db, handlers, hint::HintService, logging, state::AppState};

#[tokio::main]
async fn main() {
  logging::init();

  let config = AppConfig::load();

  let pool = db::init_db(&config.database_path).expect("Failed to initialize database");
  let hints = HintService::from_config(&config.hint).expect("Failed to build hint client");
  if !hints.is_available() {
    tracing::warn!("Starting without AI hints");
  }

  let app = handlers::router(AppState::new(pool, hints)).layer(TraceLayer::new_for_http());

  let bind_addr = config.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", config.port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
