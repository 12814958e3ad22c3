use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and everything else is
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: coursehub_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Post-commit domain events (enrollments, submissions).
    pub event_bus: Arc<coursehub_events::EventBus>,
}
