//! HTTP-level tests for the admin tenant endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn tenants_are_listed_by_last_then_first_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::login(app.clone()).await;

    for (first, last, email) in [
        ("Zoe", "Adams", "zoe@example.com"),
        ("Amy", "Baker", "amy@example.com"),
        ("Ben", "Adams", "ben@example.com"),
    ] {
        let response = post_json_auth(
            app.clone(),
            "/api/admin/tenants",
            &token,
            serde_json::json!({ "firstName": first, "lastName": last, "email": email }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app, "/api/admin/tenants", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ben", "Zoe", "Amy"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_validates_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::login(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/admin/tenants",
        &token,
        serde_json::json!({ "firstName": "No", "lastName": "At", "email": "no-at-sign" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::login(app.clone()).await;
    common::create_tenant(app.clone(), &token, "dup@example.com").await;

    let response = post_json_auth(
        app,
        "/api/admin/tenants",
        &token,
        serde_json::json!({ "firstName": "Second", "lastName": "Copy", "email": "dup@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "A tenant with this email already exists"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_is_partial_and_get_reflects_it(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::login(app.clone()).await;
    let id = common::create_tenant(app.clone(), &token, "partial@example.com").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/tenants/{id}"),
        &token,
        serde_json::json!({ "phone": "555-0100" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &format!("/api/admin/tenants/{id}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["phone"], "555-0100");
    assert_eq!(json["email"], "partial@example.com");
    assert_eq!(json["firstName"], "Jamie");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_tenant_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::login(app.clone()).await;

    let response = get_auth(app.clone(), "/api/admin/tenants/777", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, "/api/admin/tenants/777", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_is_blocked_by_active_lease(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::login(app.clone()).await;
    let property = common::create_property(app.clone(), &token, "Lived In", 1500.0).await;
    let tenant = common::create_tenant(app.clone(), &token, "resident@example.com").await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-12-31").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(app.clone(), &format!("/api/admin/tenants/{tenant}"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "Cannot delete tenant with 1 active or upcoming lease(s)"
    );

    let other = common::create_tenant(app.clone(), &token, "free@example.com").await;
    let response = delete_auth(app, &format!("/api/admin/tenants/{other}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
