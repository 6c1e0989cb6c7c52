use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studydesk::config::Config;
use studydesk::state::AppState;
use studydesk::{db, handlers, services};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "studydesk=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::load();
  let pool = db::init_db(&config.database_path).expect("Failed to initialize database");

  if config.reminder_interval_minutes > 0 {
    services::reminders::spawn_reminder_task(
      pool.clone(),
      Duration::from_secs(config.reminder_interval_minutes * 60),
    );
  } else {
    tracing::info!("Review reminders disabled");
  }

  tracing::info!(
    max_interval_days = config.scheduler.max_interval_days(),
    "Review scheduler ready"
  );

  let app = handlers::router(AppState::from_config(pool, &config));

  let bind_addr = config.server_bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://{}", bind_addr);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
