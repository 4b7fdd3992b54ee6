//! # Gatherly API
//!
//! `gatherly` is the API service of the Gatherly event platform. This crate
//! implements its session subsystem: issuing, validating, and refreshing
//! bearer tokens for the two principal roles (attendee, organizer) over a
//! stateless HTTP API.
//!
//! ## Authentication
//!
//! Login and registration issue an HS256 session token signed with the
//! server-held secret. Every protected route passes through the bearer
//! validation middleware, which attaches the decoded principal to the
//! request or rejects it with a generic `401`; the specific verification
//! failure is logged, never leaked to the caller.
//!
//! ## Collaborators
//!
//! User records (id, username, role) come from a [`api::handlers::auth::UserDirectory`]
//! implementation. Persistence, password policy, and the event-browsing
//! surface live outside this crate.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
