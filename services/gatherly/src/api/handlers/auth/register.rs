use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use session_token::{Principal, Role};
use std::sync::{Arc, OnceLock};
use tracing::info;

use super::{
    directory::NewUser,
    issue_session_token,
    state::AuthState,
    types::{AuthResponse, RegisterRequest, UserResponse},
};
use crate::api::error::{ApiError, ErrorResponse};

/// Lowercase alphanumeric plus `-`/`_`, 3 to 32 characters.
fn valid_username(username: &str) -> bool {
    static USERNAME: OnceLock<regex::Regex> = OnceLock::new();
    USERNAME
        .get_or_init(|| {
            regex::Regex::new(r"^[a-z0-9][a-z0-9_-]{2,31}$").expect("username regex is valid")
        })
        .is_match(username)
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created, session token issued.", body = AuthResponse),
        (status = 400, description = "Invalid username or password.", body = ErrorResponse),
        (status = 409, description = "Username is already taken.", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(
    Extension(state): Extension<Arc<AuthState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = payload.username.trim().to_lowercase();
    if !valid_username(&username) {
        return Err(ApiError::InvalidRequest("Invalid username".to_string()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Password must not be empty".to_string(),
        ));
    }

    let role = payload.role.map_or(Role::Attendee, Role::from);
    let record = state
        .directory()
        .create(NewUser {
            username,
            password: payload.password,
            role,
        })
        .await?;

    let principal = Principal {
        id: record.id,
        username: record.username,
        role: record.role,
    };
    let access_token = issue_session_token(state.config(), principal.clone())?;

    info!("registered {} as {}", principal.username, principal.role);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            access_token,
            user: UserResponse::from(&principal),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::valid_username;

    #[test]
    fn username_validation() {
        assert!(valid_username("ada"));
        assert!(valid_username("ada-lovelace_42"));

        assert!(!valid_username("ab"));
        assert!(!valid_username("-ada"));
        assert!(!valid_username("Ada"));
        assert!(!valid_username("ada lovelace"));
        assert!(!valid_username(&"a".repeat(33)));
    }
}
