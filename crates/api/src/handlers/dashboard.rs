//! Handler for the admin dashboard counts.

use axum::extract::State;
use axum::Json;
use rentals_db::models::dashboard::DashboardStats;
use rentals_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AdminSession;
use crate::state::AppState;

/// GET /api/admin/dashboard/stats
pub async fn stats(
    _session: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(stats))
}
