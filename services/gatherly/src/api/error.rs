//! Centralized HTTP error channel.
//!
//! Every failure a handler or the bearer middleware can produce is funneled
//! through [`ApiError`], so rejections always render the same JSON shape.
//! Verification failures deliberately collapse into one generic 401: the
//! precise reason is logged server-side, never sent to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::api::handlers::auth::directory::DirectoryError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// No `Authorization` header, or a scheme other than `Bearer`.
    #[error("Token is missing")]
    MissingCredential,
    /// The bearer credential failed verification, or the principal's role
    /// does not grant the route.
    #[error("User is not authorized")]
    NotAuthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingCredential | Self::NotAuthorized | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if let Self::Internal(detail) = &self {
            error!("internal error: {detail}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateUsername => {
                Self::Conflict("Username is already taken".to_string())
            }
            DirectoryError::Unavailable(detail) => Self::Internal(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_messages_are_stable() {
        // These strings are part of the observable API contract.
        assert_eq!(ApiError::MissingCredential.to_string(), "Token is missing");
        assert_eq!(
            ApiError::NotAuthorized.to_string(),
            "User is not authorized"
        );
    }

    #[test]
    fn statuses_map_by_variant() {
        let cases = [
            (ApiError::MissingCredential, StatusCode::UNAUTHORIZED),
            (ApiError::NotAuthorized, StatusCode::UNAUTHORIZED),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                ApiError::InvalidRequest("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Conflict("taken".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
