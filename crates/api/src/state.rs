use std::sync::Arc;

use rentals_core::clock::Clock;

use crate::auth::credentials::CredentialVerifier;
use crate::auth::session::SessionStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rentals_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Admin bearer-token sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Checks the admin login secret.
    pub credentials: Arc<dyn CredentialVerifier>,
    /// Source of "today" for lease status derivation.
    pub clock: Arc<dyn Clock>,
}
