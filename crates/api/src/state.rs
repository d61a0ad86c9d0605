use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::ResourceService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Resource CRUD operations over the configured repository.
    pub resources: ResourceService,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
