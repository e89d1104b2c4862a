use std::sync::Arc;

use crate::config::ServerConfig;
use crate::media::MediaStore;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bulletin_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Media ingestion store (one backend active per deployment).
    pub media: Arc<MediaStore>,
}
