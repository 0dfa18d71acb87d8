//! SlideDesk HTTP service
//!
//! Exposes the slide JSON conversion and screenshot services over HTTP.
//!
//! ## Routes
//!
//! - `POST /api/export-json`: editor document to canonical slide JSON
//! - `POST /api/load-json`: `{ "jsonString": "..." }` back to an editor document
//! - `POST /api/canvas/screenshot`: `{ "imageData": "data:image/png;base64,..." }`
//! - `POST /api/batch-add`: `{ "objects": [...] }` to canonical objects
//! - `GET /health`

mod config;
mod routes;

use config::ServerConfig;
use slidedesk_core::LocalService;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slidedesk_server=info,tower_http=info".into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let state = Arc::new(routes::AppState::new(LocalService::new(
        config.screenshot_dir.clone(),
    )));
    let app = routes::router(state);

    info!("SlideDesk server listening on {}", config.addr);
    info!("Screenshots are written to {}", config.screenshot_dir.display());

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
