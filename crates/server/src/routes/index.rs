// crates/server/src/routes/index.rs
//! Calculator web page.

use std::sync::Arc;

use axum::{response::Html, routing::get, Router};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / - Serve the calculator page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Create the page routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}
