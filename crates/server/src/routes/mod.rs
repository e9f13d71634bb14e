//! Route handlers for the calculator server.

pub mod calc;
pub mod health;
pub mod index;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined router.
///
/// Routes:
/// - GET  /          - Calculator page
/// - GET  /health    - Health check
/// - POST /api/calc  - Estimate tokens and cost for a prompt and/or uploads
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(index::router())
        .merge(health::router())
        .nest("/api", calc::router())
        .with_state(state)
}
