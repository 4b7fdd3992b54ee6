//! Bearer-token validation for protected routes.
//!
//! [`require_session`] runs as middleware in front of every protected
//! route: it extracts the `Authorization: Bearer` credential, verifies it
//! against the server secret, and attaches the decoded [`Principal`] to the
//! request before invoking the next stage exactly once. Rejections go
//! through [`ApiError`] so they render like every other request failure.

use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use session_token::{Principal, Role, verify_hs256};
use std::sync::Arc;
use tracing::debug;

use super::{now_unix_seconds, state::AuthState};
use crate::api::error::ApiError;

/// Extract the credential portion of an `Authorization: Bearer` header.
///
/// Returns `None` when the header is absent, unreadable, or carries a
/// different scheme.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    match parts.next() {
        Some("Bearer") => parts.next().map(ToOwned::to_owned),
        _ => None,
    }
}

/// Validate the bearer credential and attach the decoded principal.
///
/// # Errors
///
/// - [`ApiError::MissingCredential`] when no bearer credential is present;
/// - [`ApiError::NotAuthorized`] when verification fails for any reason;
///   the specific kind (malformed, bad signature, expired) is logged, not
///   leaked.
pub async fn require_session(
    Extension(state): Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_bearer_token(request.headers()) else {
        return Err(ApiError::MissingCredential);
    };

    match verify_hs256(&token, state.config().secret_bytes(), now_unix_seconds()) {
        Ok(claims) => {
            request.extensions_mut().insert(claims.user);
            Ok(next.run(request).await)
        }
        Err(err) => {
            debug!("session token rejected: {err}");
            Err(ApiError::NotAuthorized)
        }
    }
}

/// Require the authenticated principal to hold `role`.
///
/// # Errors
///
/// Returns [`ApiError::NotAuthorized`] on a role mismatch; the response
/// does not reveal whether the token or the role was at fault.
pub fn require_role(principal: &Principal, role: Role) -> Result<(), ApiError> {
    if principal.role == role {
        Ok(())
    } else {
        debug!(
            "role mismatch: {} required, {} presented",
            role, principal.role
        );
        Err(ApiError::NotAuthorized)
    }
}
