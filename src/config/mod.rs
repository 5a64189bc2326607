// Configuration module entry point
// Loads application configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{CacheConfig, Config, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; environment variables prefixed with `CACHE_DEMO`
    /// override it, using `__` between section and key
    /// (e.g. `CACHE_DEMO_SERVER__PORT=8080`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CACHE_DEMO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 7729);
        assert_eq!(cfg.server.root, ".");
        assert_eq!(cfg.cache.mode_reset_ms, 100);
        assert_eq!(cfg.cache.policy(), crate::cache::CachePolicy::default());
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:7729".parse().unwrap()
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [cache]
            mode_reset_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.cache.mode_reset_ms, 250);
        assert_eq!(cfg.cache.expires_ms, 5000);
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_shipped_config_parses() {
        let text = include_str!("../../config.toml");
        let cfg: Config = toml::from_str(text).unwrap();
        assert_eq!(cfg.server.root, "public");
        assert_eq!(cfg.cache, CacheConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cfg = Config::load_from("definitely/not/a/config/file").unwrap();
        assert_eq!(cfg.server.landing_page, "index.html");
    }

    #[test]
    fn test_invalid_address() {
        let mut cfg = Config::default();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
