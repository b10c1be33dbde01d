use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::FileStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kennel_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where photo uploads go: the image CDN when configured, else local disk.
    pub photo_store: Arc<dyn FileStore>,
    /// Where contract documents and other non-image uploads go (local disk).
    pub document_store: Arc<dyn FileStore>,
}
