//! Advisory token expiration check.
//!
//! The client cannot verify a signature, so this check only decodes the
//! payload and compares `exp` against the clock. It exists to let callers
//! skip a doomed request and attempt a refresh first; it must never gate a
//! privileged operation, the server-side validator is the sole authority.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::{TokenNamespace, TokenStore};

/// Current time as unix seconds, the unit `exp` claims use.
#[must_use]
pub fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(0))
}

/// Whether a usable token is stored under `namespace`.
///
/// `false` when no token is stored, when the payload cannot be decoded, or
/// when the embedded `exp` is not past `now_unix_seconds`. Never errors.
#[must_use]
pub fn is_token_valid(
    store: &dyn TokenStore,
    namespace: TokenNamespace,
    now_unix_seconds: i64,
) -> bool {
    match store.get_token(namespace) {
        Some(token) => expires_after(&token, now_unix_seconds),
        None => false,
    }
}

pub(crate) fn expires_after(token: &str, now_unix_seconds: i64) -> bool {
    match session_token::decode_insecure(token) {
        Ok(claims) => claims.exp > now_unix_seconds,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTokenStore;
    use session_token::{Principal, Role, issue};

    const NOW: i64 = 1_700_000_000;

    fn token(ttl_seconds: i64) -> String {
        let principal = Principal {
            id: "01J9QDCJ4W3B1T6H0Q2Y8R5KXE".to_string(),
            username: "ada".to_string(),
            role: Role::Attendee,
        };
        issue(principal, b"any-secret-works-for-decoding", ttl_seconds, NOW)
            .expect("token issues")
    }

    #[test]
    fn empty_store_is_invalid() {
        let store = MemoryTokenStore::new();
        assert!(!is_token_valid(&store, TokenNamespace::Session, NOW));
    }

    #[test]
    fn live_token_is_valid_until_exp() {
        let store = MemoryTokenStore::new();
        store.set_token(TokenNamespace::Session, &token(60));

        assert!(is_token_valid(&store, TokenNamespace::Session, NOW));
        assert!(is_token_valid(&store, TokenNamespace::Session, NOW + 59));
        assert!(!is_token_valid(&store, TokenNamespace::Session, NOW + 60));
        assert!(!is_token_valid(&store, TokenNamespace::Session, NOW + 61));
    }

    #[test]
    fn malformed_token_is_invalid_not_an_error() {
        let store = MemoryTokenStore::new();
        store.set_token(TokenNamespace::Organizer, "garbage");
        assert!(!is_token_valid(&store, TokenNamespace::Organizer, NOW));
    }

    #[test]
    fn signature_is_not_checked_here() {
        // The advisory check accepts any decodable payload; only the server
        // can reject a forged signature.
        let store = MemoryTokenStore::new();
        let mut forged = token(60);
        forged.push('x');
        store.set_token(TokenNamespace::Session, &forged);
        assert!(is_token_valid(&store, TokenNamespace::Session, NOW));
    }
}
