//! Session endpoints and bearer-token validation.
//!
//! Login and registration issue HS256 session tokens; the bearer middleware
//! in [`bearer`] validates them on every protected route. Shared issuance
//! helpers live here so handlers issue tokens identically.

pub mod bearer;
pub mod directory;
pub mod login;
pub mod refresh;
pub mod register;
pub mod session;
pub mod state;
pub mod types;

pub use directory::{InMemoryDirectory, UserDirectory};
pub use state::{AuthConfig, AuthState};

use session_token::Principal;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::error::ApiError;

/// Current time as unix seconds, the clock every issuance and verification
/// uses.
pub(crate) fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(0))
}

/// Issue a session token for `principal` with the configured TTL.
pub(crate) fn issue_session_token(
    config: &AuthConfig,
    principal: Principal,
) -> Result<String, ApiError> {
    session_token::issue(
        principal,
        config.secret_bytes(),
        config.token_ttl_seconds(),
        now_unix_seconds(),
    )
    .map_err(|err| ApiError::Internal(format!("failed to sign session token: {err}")))
}
