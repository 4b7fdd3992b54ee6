//! Client wrappers for the auth API endpoints. These keep request shapes in
//! one place so feature code never hand-builds auth payloads.

use serde::{Deserialize, Serialize};
use session_token::{Principal, Role};

use crate::api::ApiClient;
use crate::errors::ClientError;

/// Issued-credential response for login and registration.
#[derive(Debug, Deserialize)]
pub struct AuthSuccess {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: Principal,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct Registration<'a> {
    username: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Debug, Deserialize)]
struct SessionEnvelope {
    user: Principal,
}

/// Exchange credentials for a session token.
///
/// # Errors
///
/// Returns an error for transport failures or a non-success response
/// (wrong credentials surface as `ClientError::Http` with status 401).
pub async fn login(
    api: &ApiClient,
    username: &str,
    password: &str,
) -> Result<AuthSuccess, ClientError> {
    api.post_json(
        "/v1/auth/login",
        &Credentials { username, password },
        None,
    )
    .await
}

/// Create an account and receive its first session token.
///
/// # Errors
///
/// Same failure modes as [`login`]; a taken username surfaces as
/// `ClientError::Http` with status 409.
pub async fn register(
    api: &ApiClient,
    username: &str,
    password: &str,
    role: Role,
) -> Result<AuthSuccess, ClientError> {
    api.post_json(
        "/v1/auth/register",
        &Registration {
            username,
            password,
            role,
        },
        None,
    )
    .await
}

/// Fetch the principal behind a stored token, used to rehydrate session
/// state on startup.
///
/// Returns `Ok(None)` when the server rejects the token; the caller should
/// treat that as "not authenticated", not as a failure.
///
/// # Errors
///
/// Returns an error for transport failures or unexpected statuses.
pub async fn fetch_session(
    api: &ApiClient,
    token: &str,
) -> Result<Option<Principal>, ClientError> {
    match api
        .get_json::<SessionEnvelope>("/v1/auth/session", Some(token))
        .await
    {
        Ok(envelope) => Ok(Some(envelope.user)),
        Err(ClientError::Http { status: 401, .. }) => Ok(None),
        Err(err) => Err(err),
    }
}
