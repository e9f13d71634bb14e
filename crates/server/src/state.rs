// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;

use anyhow::anyhow;
use tokencost_core::{default_pricing, lookup_pricing, Calculator};

use crate::config::ServerConfig;

/// Shared application state accessible from all route handlers.
///
/// Read-only after startup; handlers never mutate it.
#[derive(Debug)]
pub struct AppState {
    /// Calculator bound to the configured model and projection volume.
    pub calculator: Calculator,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(calculator: Calculator) -> Arc<Self> {
        Arc::new(Self { calculator })
    }

    /// Resolve the configured model against the built-in pricing table.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Arc<Self>> {
        let table = default_pricing();
        let pricing = lookup_pricing(&config.model_id, &table)
            .cloned()
            .ok_or_else(|| anyhow!("No pricing known for model '{}'", config.model_id))?;

        Ok(Self::new(Calculator::new(pricing, config.requests_per_day)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let state = AppState::from_config(&ServerConfig::default()).unwrap();
        assert_eq!(state.calculator.pricing().name, "Claude Sonnet 4.5");
        assert_eq!(state.calculator.requests_per_day(), 100);
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let config = ServerConfig {
            model_id: "gpt-4o".into(),
            ..ServerConfig::default()
        };
        let err = AppState::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("gpt-4o"));
    }
}
