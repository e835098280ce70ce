use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted, the config is
/// behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ideatrack_db::DbPool,
    /// Server configuration (JWT settings, cookie flags).
    pub config: Arc<ServerConfig>,
}
