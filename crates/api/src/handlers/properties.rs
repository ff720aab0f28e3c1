//! Handlers for the public `/properties` and admin `/admin/properties` resources.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rentals_core::types::DbId;
use rentals_db::models::property::{CreateProperty, Property, UpdateProperty};

use crate::engine::properties;
use crate::error::AppResult;
use crate::middleware::auth::AdminSession;
use crate::query::PropertySearchParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/properties
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<PropertySearchParams>,
) -> AppResult<Json<Vec<Property>>> {
    let found = properties::search(&state.pool, &params.into_filter()).await?;
    Ok(Json(found))
}

/// GET /api/properties/{id}
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Property>> {
    Ok(Json(properties::get(&state.pool, id).await?))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/admin/properties
pub async fn list(
    _session: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Property>>> {
    Ok(Json(properties::list(&state.pool).await?))
}

/// GET /api/admin/properties/{id}
pub async fn get_by_id(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Property>> {
    Ok(Json(properties::get(&state.pool, id).await?))
}

/// POST /api/admin/properties
pub async fn create(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateProperty>,
) -> AppResult<(StatusCode, Json<Property>)> {
    let property = properties::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

/// PUT /api/admin/properties/{id}
pub async fn update(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProperty>,
) -> AppResult<Json<Property>> {
    Ok(Json(properties::update(&state.pool, id, &input).await?))
}

/// DELETE /api/admin/properties/{id}
pub async fn delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    properties::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
