//! Shared application state for request handlers.

use std::sync::Arc;

use crate::assets::AssetDir;
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration and the asset directory handle used
/// to read the built front-end from disk. Constructed once at startup;
/// nothing in it is mutable afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assets: AssetDir,
}

impl AppState {
    /// Creates a new application state from the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let assets = AssetDir::new(&config.assets.root);
        Self {
            config: Arc::new(config),
            assets,
        }
    }
}
