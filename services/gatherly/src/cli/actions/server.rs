use crate::api::{self, handlers::auth::{AuthConfig, InMemoryDirectory}};
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub session_secret: SecretString,
    pub token_ttl_seconds: i64,
    pub frontend_base_url: String,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the configuration is invalid or the server fails to
/// start.
pub async fn execute(args: Args) -> Result<()> {
    let config = AuthConfig::new(args.session_secret, args.frontend_base_url)
        .with_token_ttl_seconds(args.token_ttl_seconds);

    // User records are an external collaborator; the bundled directory keeps
    // them in memory and is populated through the register endpoint.
    let directory = Arc::new(InMemoryDirectory::new());

    api::new(args.port, config, directory).await
}
