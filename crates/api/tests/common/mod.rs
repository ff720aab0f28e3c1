#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use rentals_core::clock::FixedClock;
use rentals_core::types::Date;
use sqlx::PgPool;
use tower::ServiceExt;

use rentals_api::auth::credentials::StaticPasswordVerifier;
use rentals_api::auth::session::InMemorySessionStore;
use rentals_api::config::{AdminCredential, ServerConfig};
use rentals_api::router::build_app_router;
use rentals_api::state::AppState;

/// Admin password accepted by the test app.
pub const ADMIN_PASSWORD: &str = "test-admin-password";

/// Allowed CORS origin in the test config.
pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        session_ttl_hours: 24,
        lease_refresh_interval_secs: 86_400,
        db_max_connections: 5,
        db_min_connections: 1,
        db_max_lifetime_secs: 300,
        admin_credential: AdminCredential::Password(ADMIN_PASSWORD.to_string()),
    }
}

/// Default "today" for tests that do not care about the date.
pub fn default_today() -> Date {
    date("2025-03-15")
}

pub fn date(s: &str) -> Date {
    Date::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Build the full application router, pinned to [`default_today`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_at(pool, default_today())
}

/// Build the full application router with the clock fixed at `today`.
///
/// Uses [`build_app_router`], so tests exercise the same middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) as production.
pub fn build_test_app_at(pool: PgPool, today: Date) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions: Arc::new(InMemorySessionStore::new()),
        credentials: Arc::new(StaticPasswordVerifier::new(ADMIN_PASSWORD)),
        clock: Arc::new(FixedClock(today)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Log in as admin and return the bearer token.
pub async fn login(app: Router) -> String {
    let response = post_json(
        app,
        "/api/admin/login",
        serde_json::json!({ "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a property through the admin API and return its id.
pub async fn create_property(app: Router, token: &str, name: &str, rent: f64) -> i64 {
    let response = post_json_auth(
        app,
        "/api/admin/properties",
        token,
        serde_json::json!({
            "name": name,
            "addressLine1": "12 Elm St",
            "city": "Springfield",
            "state": "IL",
            "zip": "62701",
            "bedrooms": 2,
            "bathrooms": 1.5,
            "monthlyRent": rent,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a tenant through the admin API and return its id.
pub async fn create_tenant(app: Router, token: &str, email: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/admin/tenants",
        token,
        serde_json::json!({
            "firstName": "Jamie",
            "lastName": "Rivera",
            "email": email,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Book `property_id` for `tenant_id` and return the raw response.
pub async fn create_lease(
    app: Router,
    token: &str,
    property_id: i64,
    tenant_id: i64,
    start: &str,
    end: &str,
) -> Response {
    post_json_auth(
        app,
        "/api/admin/leases",
        token,
        serde_json::json!({
            "propertyId": property_id,
            "tenantId": tenant_id,
            "startDate": start,
            "endDate": end,
            "monthlyRent": 1500.0,
        }),
    )
    .await
}
