//! Route definitions for the `/admin` area.
//!
//! Login and logout are open; every other handler takes an
//! [`AdminSession`](crate::middleware::auth::AdminSession) and so rejects
//! requests without a valid bearer token.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, dashboard, leases, properties, tenants};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /login               -> login
/// POST   /logout              -> logout
/// GET    /me                  -> me
/// GET    /dashboard/stats     -> dashboard::stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/dashboard/stats", get(dashboard::stats))
        .nest("/properties", properties_router())
        .nest("/tenants", tenants_router())
        .nest("/leases", leases_router())
}

/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
fn properties_router() -> Router<AppState> {
    Router::new()
        .route("/", get(properties::list).post(properties::create))
        .route(
            "/{id}",
            get(properties::get_by_id)
                .put(properties::update)
                .delete(properties::delete),
        )
}

fn tenants_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tenants::list).post(tenants::create))
        .route(
            "/{id}",
            get(tenants::get_by_id)
                .put(tenants::update)
                .delete(tenants::delete),
        )
}

/// `GET /` accepts `?status=&propertyId=&tenantId=`.
fn leases_router() -> Router<AppState> {
    Router::new()
        .route("/", get(leases::list).post(leases::create))
        .route(
            "/{id}",
            get(leases::get_by_id)
                .put(leases::update)
                .delete(leases::delete),
        )
}
