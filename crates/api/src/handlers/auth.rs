//! Handlers for the `/admin` session endpoints (login, logout, me).

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use rentals_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{bearer_token, AdminSession};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// Successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Session introspection for the admin UI.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub role: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/admin/login
///
/// Exchange the admin password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if input.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".into()));
    }

    if let Err(e) = state.credentials.verify(&input.password).await {
        tracing::warn!("Admin login rejected");
        return Err(e.into());
    }

    let session = state.sessions.issue(state.config.session_ttl()).await;
    tracing::info!(expires_at = %session.expires_at, "Admin session issued");

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}

/// POST /api/admin/logout
///
/// Revokes the presented bearer token, if any. Always succeeds.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<MessageResponse> {
    if let Some(token) = bearer_token(&headers) {
        if state.sessions.revoke(token).await {
            tracing::info!("Admin session revoked");
        }
    }
    Json(MessageResponse {
        message: "Logged out",
    })
}

/// GET /api/admin/me
pub async fn me(session: AdminSession) -> Json<MeResponse> {
    Json(MeResponse {
        authenticated: true,
        role: session.principal.role,
    })
}
