use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Principal role carried inside a session token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Attendee,
    Organizer,
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attendee => "attendee",
            Self::Organizer => "organizer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity embedded in a token's `user` claim.
///
/// Immutable once issued: changing any field requires issuing a new token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub user: Principal,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl SessionClaims {
    /// Build claims for a freshly issued token: `iat = now`,
    /// `exp = now + ttl`, and a unique `jti`.
    #[must_use]
    pub fn new(user: Principal, ttl_seconds: i64, now_unix_seconds: i64) -> Self {
        Self {
            user,
            exp: now_unix_seconds + ttl_seconds,
            iat: now_unix_seconds,
            jti: Ulid::new().to_string(),
        }
    }
}
