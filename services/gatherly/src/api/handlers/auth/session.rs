use axum::{Json, extract::Extension, response::IntoResponse};
use session_token::Principal;

use super::types::{SessionResponse, UserResponse};
use crate::api::error::ErrorResponse;

/// Return the authenticated principal.
///
/// Clients call this after startup to rehydrate their session state from a
/// stored token.
#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "The authenticated principal.", body = SessionResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn session(Extension(principal): Extension<Principal>) -> impl IntoResponse {
    Json(SessionResponse {
        user: UserResponse::from(&principal),
    })
}
