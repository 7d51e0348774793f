use std::sync::Arc;

use jobflow_ai::TextGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: jobflow_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The AI content-generation collaborator. Behind a trait object so
    /// tests can substitute a stub.
    pub generator: Arc<dyn TextGenerator>,
}
