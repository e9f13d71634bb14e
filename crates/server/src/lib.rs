// crates/server/src/lib.rs
//! Prompt cost calculator server library.
//!
//! This crate provides the Axum-based HTTP boundary around `tokencost-core`:
//! a calculation endpoint, a health probe, and the calculator page.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the Axum application for `config`.
///
/// Fails when the configured model has no pricing.
pub fn create_app(config: &ServerConfig) -> anyhow::Result<Router> {
    let state = AppState::from_config(config)?;
    Ok(create_app_with_state(state, config))
}

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - Routes (page, health, calc)
/// - Request body limit for uploads
/// - CORS (any origin, GET/POST, Content-Type)
/// - Request tracing
/// - Optional static file fallback
pub fn create_app_with_state(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let mut app = api_routes(state);
    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
