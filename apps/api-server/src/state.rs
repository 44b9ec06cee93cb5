//! Application state.

use std::sync::Arc;

use task_store::TaskStore;

use crate::config::Config;

/// Shared application state.
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// The task store selected at startup.
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    /// Creates new application state.
    pub fn new(config: Config, store: Arc<dyn TaskStore>) -> Self {
        Self { config, store }
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<AppState>;
