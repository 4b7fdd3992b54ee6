//! Auth configuration and shared request state.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use super::directory::UserDirectory;

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 60 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    session_secret: SecretString,
    frontend_base_url: String,
    token_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(session_secret: SecretString, frontend_base_url: String) -> Self {
        Self {
            session_secret,
            frontend_base_url,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }

    pub(crate) fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.session_secret.expose_secret().as_bytes()
    }
}

/// Read-only state shared by every request: the token configuration and the
/// user-record directory. The only mutability lives behind the directory
/// implementation.
pub struct AuthState {
    config: AuthConfig,
    directory: Arc<dyn UserDirectory>,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, directory: Arc<dyn UserDirectory>) -> Self {
        Self { config, directory }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub(crate) fn directory(&self) -> &dyn UserDirectory {
        self.directory.as_ref()
    }
}
