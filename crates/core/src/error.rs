//! Domain error type shared by every layer.
//!
//! Each variant maps to one stable, machine-distinguishable error kind in
//! the HTTP layer (see `rentals_api::error::AppError`).

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity (property, tenant, lease) does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or missing input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request is well-formed but clashes with existing state
    /// (overlapping lease, duplicate email, delete blocked by a lease).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, invalid or expired credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] on `entity`.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}
