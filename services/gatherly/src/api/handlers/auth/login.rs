use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use session_token::Principal;
use std::sync::Arc;
use tracing::info;

use super::{
    issue_session_token,
    state::AuthState,
    types::{AuthResponse, LoginRequest, UserResponse},
};
use crate::api::error::{ApiError, ErrorResponse};

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, session token issued.", body = AuthResponse),
        (status = 401, description = "Unknown user or wrong password.", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(state): Extension<Arc<AuthState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .directory()
        .authenticate(&payload.username, &payload.password)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let principal = Principal {
        id: record.id,
        username: record.username,
        role: record.role,
    };
    let access_token = issue_session_token(state.config(), principal.clone())?;

    info!("session issued for {}", principal.username);

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            success: true,
            access_token,
            user: UserResponse::from(&principal),
        }),
    ))
}
