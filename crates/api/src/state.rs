use std::sync::Arc;

use sbtet_upstream::StudentPortal;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Upstream portal client and its results caches.
    pub portal: Arc<StudentPortal>,
}

impl AppState {
    /// Build state from configuration, creating the portal and its caches.
    pub fn new(config: ServerConfig) -> Self {
        let portal = StudentPortal::from_config(config.upstream.clone());
        Self {
            config: Arc::new(config),
            portal: Arc::new(portal),
        }
    }
}
