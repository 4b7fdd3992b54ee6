use axum::{Json, extract::Extension, response::IntoResponse};
use session_token::Principal;
use std::sync::Arc;
use tracing::debug;

use super::{issue_session_token, state::AuthState, types::RefreshResponse};
use crate::api::error::{ApiError, ErrorResponse};

/// Exchange a still-valid bearer token for a fresh one.
///
/// The bearer middleware has already verified the presented token, so an
/// expired token never reaches this handler: refresh extends live sessions
/// only, re-login is required after expiry.
#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    responses(
        (status = 200, description = "New session token issued.", body = RefreshResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn refresh(
    Extension(state): Extension<Arc<AuthState>>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = issue_session_token(state.config(), principal.clone())?;

    debug!("session refreshed for {}", principal.username);

    Ok(Json(RefreshResponse {
        success: true,
        access_token,
    }))
}
