pub mod controller;
pub mod error;
pub mod extractors;
pub mod params;
pub mod router;

pub use error::{Error, Result};
pub use service::AppState;

use axum::http::{header, HeaderName, HeaderValue, Method};
use log::*;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Binds the listener and serves the API router until shutdown.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;

    let origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin}: {e:?}");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-version"),
        ]);

    let router = router::define_routes(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("Server listening on {host}:{port}");

    axum::serve(listener, router).await
}
