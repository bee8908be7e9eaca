use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted, config is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: chartdesk_db::DbPool,
    /// Server configuration (JWT settings for extractors, chart capacity for handlers).
    pub config: Arc<ServerConfig>,
}
