use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing here is mutable: requests are handled statelessly and the database
/// pool is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: eventlog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
