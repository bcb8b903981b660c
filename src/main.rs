use log::*;
use service::{config::Config, logging::Logger, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();

    Logger::init_logger(&config);

    info!(
        "Starting Momentum platform backend ({} environment)",
        config.runtime_env()
    );

    let db = Arc::new(
        service::init_database(&config)
            .await
            .expect("Failed to connect to the database"),
    );

    let app_state = AppState::new(config, &db);

    web::init_server(app_state)
        .await
        .expect("Failed to start API server");
}
