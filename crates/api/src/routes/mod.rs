pub mod admin;
pub mod health;
pub mod properties;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                 service and database health
///
/// /properties                             public search (GET)
/// /properties/{id}                        public detail (GET)
///
/// /admin/login                            exchange password for token (POST)
/// /admin/logout                           revoke token (POST)
/// /admin/me                               session introspection (GET)
/// /admin/dashboard/stats                  dashboard counts (GET)
/// /admin/properties                       list, create
/// /admin/properties/{id}                  get, update, delete
/// /admin/tenants                          list, create
/// /admin/tenants/{id}                     get, update, delete
/// /admin/leases                           list (?status, propertyId, tenantId), create
/// /admin/leases/{id}                      get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        // Public listings.
        .nest("/properties", properties::router())
        // Session endpoints and bearer-gated resources.
        .nest("/admin", admin::router())
}
