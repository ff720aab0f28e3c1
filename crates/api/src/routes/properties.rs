//! Route definitions for the public `/properties` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::properties;
use crate::state::AppState;

/// Routes mounted at `/properties`. No authentication.
///
/// ```text
/// GET /       -> search
/// GET /{id}   -> get_public
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(properties::search))
        .route("/{id}", get(properties::get_public))
}
