//! Handlers for the `/admin/tenants` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rentals_core::types::DbId;
use rentals_db::models::tenant::{CreateTenant, Tenant, UpdateTenant};

use crate::engine::tenants;
use crate::error::AppResult;
use crate::middleware::auth::AdminSession;
use crate::state::AppState;

/// GET /api/admin/tenants
pub async fn list(
    _session: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Tenant>>> {
    Ok(Json(tenants::list(&state.pool).await?))
}

/// GET /api/admin/tenants/{id}
pub async fn get_by_id(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Tenant>> {
    Ok(Json(tenants::get(&state.pool, id).await?))
}

/// POST /api/admin/tenants
pub async fn create(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateTenant>,
) -> AppResult<(StatusCode, Json<Tenant>)> {
    let tenant = tenants::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

/// PUT /api/admin/tenants/{id}
pub async fn update(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTenant>,
) -> AppResult<Json<Tenant>> {
    Ok(Json(tenants::update(&state.pool, id, &input).await?))
}

/// DELETE /api/admin/tenants/{id}
pub async fn delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    tenants::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
