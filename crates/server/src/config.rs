//! Process configuration read once from the environment at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use tokencost_core::{DEFAULT_MODEL_ID, DEFAULT_REQUESTS_PER_DAY};

/// Default port for the server.
pub const DEFAULT_PORT: u16 = 8080;

/// Default request body limit (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub debug: bool,
    /// Model to price against; resolved through the pricing table.
    pub model_id: String,
    /// Daily request volume behind the weekly/monthly projections.
    pub requests_per_day: u32,
    pub max_upload_bytes: usize,
    /// Optional directory of extra static assets.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            debug: false,
            model_id: DEFAULT_MODEL_ID.to_string(),
            requests_per_day: DEFAULT_REQUESTS_PER_DAY,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unparsable values
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            debug: lookup("DEBUG")
                .map(|d| d.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.debug),
            model_id: lookup("MODEL_ID")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.model_id),
            requests_per_day: lookup("REQUESTS_PER_DAY")
                .and_then(|r| r.parse().ok())
                .unwrap_or(defaults.requests_per_day),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|b| b.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            static_dir: lookup("STATIC_DIR")
                .filter(|d| !d.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug,hyper=info"
        } else {
            "warn,tokencost_server=info,tokencost_core=info,tower_http=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert_eq!(config.requests_per_day, 100);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("DEBUG", "TRUE"),
            ("HOST", "127.0.0.1"),
            ("REQUESTS_PER_DAY", "250"),
            ("STATIC_DIR", "public"),
        ]);
        assert_eq!(config.addr().to_string(), "127.0.0.1:9000");
        assert!(config.debug);
        assert_eq!(config.requests_per_day, 250);
        assert_eq!(config.static_dir, Some(PathBuf::from("public")));
        assert!(config.default_log_filter().starts_with("debug"));
    }

    #[test]
    fn test_debug_only_true_enables() {
        assert!(!config_from(&[("DEBUG", "1")]).debug);
        assert!(!config_from(&[("DEBUG", "yes")]).debug);
        assert!(config_from(&[("DEBUG", "true")]).debug);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[("PORT", "http"), ("MODEL_ID", "  "), ("STATIC_DIR", "")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.static_dir, None);
    }
}
