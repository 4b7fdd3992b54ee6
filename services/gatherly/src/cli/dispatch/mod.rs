//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the
//! appropriate action, such as starting the API server with its full
//! configuration state.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::auth;
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let session_secret = matches
        .get_one::<String>(auth::ARG_SESSION_SECRET)
        .cloned()
        .context("missing required argument: --session-secret")?;

    let token_ttl_seconds = matches
        .get_one::<i64>(auth::ARG_TOKEN_TTL_SECONDS)
        .copied()
        .unwrap_or(3600);

    if token_ttl_seconds <= 0 {
        anyhow::bail!("--token-ttl-seconds must be positive");
    }

    let frontend_base_url = matches
        .get_one::<String>(auth::ARG_FRONTEND_BASE_URL)
        .cloned()
        .context("missing required argument: --frontend-base-url")?;

    Ok(Action::Server(Args {
        port,
        session_secret: SecretString::from(session_secret),
        token_ttl_seconds,
        frontend_base_url,
    }))
}
