//! HTTP invocation surface: a small JSON API over the comparison core.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::{Arc, Mutex};

use crate::compare::CompareConfig;
use crate::resolve::CsvResolver;

pub fn build_router(config: CompareConfig) -> Router {
    let state = Arc::new(AppState {
        csv: Mutex::new(CsvResolver::new(config.dataset.clone())),
        config,
    });

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/compare", get(handlers::compare))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, config: CompareConfig) {
    let app = build_router(config);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  distancia server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    });
}
