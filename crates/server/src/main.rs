// crates/server/src/main.rs
//! Prompt cost calculator server binary.

use anyhow::{Context, Result};
use tokencost_server::{create_app_with_state, AppState, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .init();

    let state = AppState::from_config(&config)?;
    let model = state.calculator.pricing().name.clone();
    let app = create_app_with_state(state, &config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    // Print banner
    eprintln!("\n\u{1f4b0} tokencost v{}\n", env!("CARGO_PKG_VERSION"));
    eprintln!("  Server: http://{}", addr);
    eprintln!("  Model:  {}", model);
    eprintln!("  Debug:  {}\n", config.debug);

    tracing::info!(
        %addr,
        model = %model,
        debug = config.debug,
        requests_per_day = config.requests_per_day,
        max_upload_bytes = config.max_upload_bytes,
        "Calculator server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
