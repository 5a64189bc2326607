// Application state module
// Holds the configuration and the shared caching mode cell

use std::path::PathBuf;
use std::sync::Arc;

use super::types::Config;
use crate::cache::{CachePolicy, ModeSelector};

/// Application state shared by all connections
pub struct AppState {
    pub config: Config,
    pub modes: Arc<ModeSelector>,
    pub policy: CachePolicy,
    pub root: PathBuf,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            modes: Arc::new(ModeSelector::new(config.cache.mode_reset())),
            policy: config.cache.policy(),
            root: PathBuf::from(&config.server.root),
        }
    }

    /// Path of the landing page file
    pub fn landing_page_path(&self) -> PathBuf {
        self.root.join(&self.config.server.landing_page)
    }
}
