// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cache::CachePolicy;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub cache: CacheConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Document root that resource paths resolve under
    pub root: String,
    /// Landing page served on trigger paths, relative to `root`
    pub landing_page: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7729,
            workers: None,
            root: ".".to_string(),
            landing_page: "index.html".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    pub error_log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: true,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds a connection may stay open
    pub request_timeout: u64,
    pub max_connections: Option<usize>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive: true,
            request_timeout: 30,
            max_connections: None,
        }
    }
}

/// Caching demonstration settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a trigger path keeps its mode active
    pub mode_reset_ms: u64,
    /// Offset of the `Expires` header from request time
    pub expires_ms: u64,
    /// `Cache-Control: max-age` value
    pub max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            mode_reset_ms: 100,
            expires_ms: 5000,
            max_age_secs: 5,
        }
    }
}

impl CacheConfig {
    pub const fn mode_reset(&self) -> Duration {
        Duration::from_millis(self.mode_reset_ms)
    }

    pub const fn policy(&self) -> CachePolicy {
        CachePolicy {
            expires_in: Duration::from_millis(self.expires_ms),
            max_age: self.max_age_secs,
        }
    }
}
