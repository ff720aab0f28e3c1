//! HTTP-level tests for the lease lifecycle: status derivation, overlap
//! protection and availability propagation.
//!
//! The app clock is pinned to 2025-03-15 unless a test says otherwise.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

/// Property, tenant and token for a fresh booking scenario.
async fn setup(app: Router) -> (String, i64, i64) {
    let token = common::login(app.clone()).await;
    let property = common::create_property(app.clone(), &token, "Linden House", 1500.0).await;
    let tenant = common::create_tenant(app, &token, "tenant@example.com").await;
    (token, property, tenant)
}

async fn property_available(app: Router, property: i64) -> bool {
    let response = get(app, &format!("/api/properties/{property}")).await;
    body_json(response).await["available"].as_bool().unwrap()
}

// ---------------------------------------------------------------------------
// Create: validation order
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_ids_and_dates(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, _) = setup(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/admin/leases",
        &token,
        serde_json::json!({ "propertyId": property, "startDate": "2025-01-01", "endDate": "2025-06-30" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Property, tenant, start date, and end date are required"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_bad_date_format(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response = common::create_lease(app, &token, property, tenant, "01/01/2025", "2025-06-30").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_end_before_or_on_start(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2024-12-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = common::create_lease(app, &token, property, tenant, "2025-01-01", "2025-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_unknown_property_or_tenant_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, 99_999, tenant, "2025-01-01", "2025-06-30").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::create_lease(app, &token, property, 99_999, "2025-01-01", "2025-06-30").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn payment_due_day_defaults_and_bounds(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/admin/leases",
        &token,
        serde_json::json!({
            "propertyId": property,
            "tenantId": tenant,
            "startDate": "2024-01-01",
            "endDate": "2024-06-30",
            "monthlyRent": 1500.0,
            "paymentDueDay": 32,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/admin/leases",
        &token,
        serde_json::json!({
            "propertyId": property,
            "tenantId": tenant,
            "startDate": "2024-01-01",
            "endDate": "2024-06-30",
            "monthlyRent": 1500.0,
            "paymentDueDay": 0,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["paymentDueDay"], 1);
}

// ---------------------------------------------------------------------------
// Create: status derivation and availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn past_range_is_ended_and_leaves_property_available(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2024-01-01", "2024-12-31").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let lease = body_json(response).await;
    assert_eq!(lease["status"], "ended");
    assert!(lease.get("propertyName").is_none());

    assert!(property_available(app, property).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn active_lease_takes_property_off_market_until_deleted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-06-30").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let lease = body_json(response).await;
    assert_eq!(lease["status"], "active");
    assert!(!property_available(app.clone(), property).await);

    let lease_id = lease["id"].as_i64().unwrap();
    let response = delete_auth(app.clone(), &format!("/api/admin/leases/{lease_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(property_available(app.clone(), property).await);

    let response = delete_auth(app, &format!("/api/admin/leases/{lease_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn future_range_is_upcoming(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-04-01", "2026-03-31").await;
    assert_eq!(body_json(response).await["status"], "upcoming");
    assert!(property_available(app, property).await);
}

// ---------------------------------------------------------------------------
// Overlap protection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn touching_boundary_is_an_overlap(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-06-30").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-06-30", "2025-08-01").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "This property already has an active or upcoming lease during this period"
    );

    let response = common::create_lease(app, &token, property, tenant, "2025-07-01", "2025-08-01").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ended_leases_do_not_block_new_bookings(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2024-01-01", "2024-12-31").await;
    assert_eq!(body_json(response).await["status"], "ended");

    // A past window inside the ended lease is itself ended and allowed.
    let response = common::create_lease(app, &token, property, tenant, "2024-03-01", "2024-04-30").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn other_properties_are_independent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;
    let second = common::create_property(app.clone(), &token, "Second", 1100.0).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-06-30").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = common::create_lease(app, &token, second, tenant, "2025-01-01", "2025-06-30").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_and_get_include_display_names(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2024-01-01", "2024-06-30").await;
    let older = body_json(response).await["id"].as_i64().unwrap();
    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-06-30").await;
    let newer = body_json(response).await["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/admin/leases", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![newer, older]);
    assert_eq!(json[0]["propertyName"], "Linden House");
    assert_eq!(json[0]["tenantName"], "Jamie Rivera");

    let response = get_auth(app.clone(), &format!("/api/admin/leases/{older}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "ended");
    assert_eq!(json["tenantName"], "Jamie Rivera");

    let response = get_auth(app, "/api/admin/leases/123456", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_by_status_and_ids(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;
    let other_tenant = common::create_tenant(app.clone(), &token, "other@example.com").await;

    common::create_lease(app.clone(), &token, property, tenant, "2024-01-01", "2024-06-30").await;
    common::create_lease(app.clone(), &token, property, other_tenant, "2025-01-01", "2025-06-30").await;

    let response = get_auth(app.clone(), "/api/admin/leases?status=active", &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["tenantId"], other_tenant);

    let response = get_auth(
        app.clone(),
        &format!("/api/admin/leases?propertyId={property}&tenantId={tenant}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["status"], "ended");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_rejects_unknown_status_and_bad_ids(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::login(app.clone()).await;

    let response = get_auth(app.clone(), "/api/admin/leases?status=terminated", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app, "/api/admin/leases?propertyId=abc", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_rederives_status_and_ignores_client_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-06-30").await;
    let lease_id = body_json(response).await["id"].as_i64().unwrap();
    assert!(!property_available(app.clone(), property).await);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/leases/{lease_id}"),
        &token,
        serde_json::json!({ "endDate": "2025-02-28", "status": "active" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ended");
    assert_eq!(json["endDate"], "2025-02-28");
    assert!(property_available(app.clone(), property).await);

    // Extending it again revives the lease and takes the property back.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/leases/{lease_id}"),
        &token,
        serde_json::json!({ "endDate": "2025-12-31" }),
    )
    .await;
    assert_eq!(body_json(response).await["status"], "active");
    assert!(!property_available(app, property).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_excludes_itself_from_overlap_but_not_others(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-06-30").await;
    let first = body_json(response).await["id"].as_i64().unwrap();
    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-07-01", "2025-12-31").await;
    let second = body_json(response).await["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/leases/{first}"),
        &token,
        serde_json::json!({ "notes": "renewal pending", "monthlyRent": 1600.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["notes"], "renewal pending");
    assert_eq!(json["monthlyRent"], 1600.0);

    let response = put_json_auth(
        app,
        &format!("/api/admin/leases/{second}"),
        &token,
        serde_json::json!({ "startDate": "2025-06-30" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn notes_edit_of_ended_lease_ignores_later_overlapping_booking(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-02-01").await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "ended");
    let ended = json["id"].as_i64().unwrap();

    // Ended leases do not block, so this booking overlaps the one above.
    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-15", "2025-12-31").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/leases/{ended}"),
        &token,
        serde_json::json!({ "notes": "deposit returned" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["notes"], "deposit returned");
    assert_eq!(json["status"], "ended");

    // Reviving it into the booked window still conflicts.
    let response = put_json_auth(
        app,
        &format!("/api/admin/leases/{ended}"),
        &token,
        serde_json::json!({ "endDate": "2025-04-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_overlapping_bookings_admit_exactly_one(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let mut set = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let app = app.clone();
        let token = token.clone();
        set.spawn(async move {
            common::create_lease(app, &token, property, tenant, "2025-04-01", "2025-09-30")
                .await
                .status()
        });
    }

    let mut statuses = Vec::new();
    while let Some(status) = set.join_next().await {
        statuses.push(status.unwrap());
    }
    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!((created, conflicts), (1, 7), "statuses: {statuses:?}");

    let response = get_auth(
        app,
        &format!("/api/admin/leases?propertyId={property}"),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn moving_an_active_lease_resyncs_both_properties(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;
    let target = common::create_property(app.clone(), &token, "Target", 1300.0).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-06-30").await;
    let lease_id = body_json(response).await["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/leases/{lease_id}"),
        &token,
        serde_json::json!({ "propertyId": target }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(property_available(app.clone(), property).await);
    assert!(!property_available(app, target).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_validates_merged_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, property, tenant) = setup(app.clone()).await;

    let response =
        common::create_lease(app.clone(), &token, property, tenant, "2025-01-01", "2025-06-30").await;
    let lease_id = body_json(response).await["id"].as_i64().unwrap();
    let uri = format!("/api/admin/leases/{lease_id}");

    let response = put_json_auth(
        app.clone(),
        &uri,
        &token,
        serde_json::json!({ "endDate": "2024-12-31" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app.clone(),
        &uri,
        &token,
        serde_json::json!({ "tenantId": 99_999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(
        app,
        "/api/admin/leases/99999",
        &token,
        serde_json::json!({ "notes": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
