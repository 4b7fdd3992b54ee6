//! Signed session tokens for the Gatherly API.
//!
//! A session token is a compact HS256 JWT carrying the authenticated
//! [`Principal`] plus expiration and issued-at claims. The server signs and
//! verifies tokens against a single secret; clients may decode the payload
//! for UX decisions but can never verify it ([`decode_insecure`]).

mod claims;
mod error;
mod jwt;

pub use claims::{Principal, Role, SessionClaims};
pub use error::Error;
pub use jwt::{decode_insecure, issue, sign_hs256, verify_hs256};
