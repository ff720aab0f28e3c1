//! Handlers for the `/admin/leases` resource.
//!
//! "Today" for status derivation comes from the state's clock.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rentals_core::types::DbId;
use rentals_db::models::lease::{CreateLease, Lease, UpdateLease};

use crate::engine::leases;
use crate::error::AppResult;
use crate::middleware::auth::AdminSession;
use crate::query::LeaseListParams;
use crate::state::AppState;

/// GET /api/admin/leases?status=&propertyId=&tenantId=
pub async fn list(
    _session: AdminSession,
    State(state): State<AppState>,
    Query(params): Query<LeaseListParams>,
) -> AppResult<Json<Vec<Lease>>> {
    let filter = params.into_filter()?;
    Ok(Json(leases::list(&state.pool, &filter).await?))
}

/// GET /api/admin/leases/{id}
pub async fn get_by_id(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Lease>> {
    Ok(Json(leases::get(&state.pool, id).await?))
}

/// POST /api/admin/leases
pub async fn create(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateLease>,
) -> AppResult<(StatusCode, Json<Lease>)> {
    let lease = leases::create(&state.pool, state.clock.today(), &input).await?;
    Ok((StatusCode::CREATED, Json(lease)))
}

/// PUT /api/admin/leases/{id}
pub async fn update(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLease>,
) -> AppResult<Json<Lease>> {
    let lease = leases::update(&state.pool, state.clock.today(), id, &input).await?;
    Ok(Json(lease))
}

/// DELETE /api/admin/leases/{id}
pub async fn delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    leases::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
