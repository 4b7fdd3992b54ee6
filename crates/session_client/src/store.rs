//! Namespaced persistence for session tokens.
//!
//! One token per role namespace: the default session slot for attendees and
//! a separate organizer slot. An absent entry means "not authenticated",
//! never an error.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Storage slot for a role-scoped token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenNamespace {
    /// Default attendee session.
    Session,
    /// Organizer-scoped session.
    Organizer,
}

impl TokenNamespace {
    #[must_use]
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Session => "token",
            Self::Organizer => "organizer_token",
        }
    }
}

impl std::fmt::Display for TokenNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// Token persistence boundary; embedders plug in their own backing storage.
pub trait TokenStore: Send + Sync {
    /// Replace the token stored under `namespace`.
    fn set_token(&self, namespace: TokenNamespace, token: &str);

    /// The token stored under `namespace`, if any.
    fn get_token(&self, namespace: TokenNamespace) -> Option<String>;

    /// Remove the token stored under `namespace`. Clearing an empty slot is
    /// a no-op.
    fn clear_token(&self, namespace: TokenNamespace);
}

/// In-memory token store, the default backing for tests and embedded use.
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<&'static str, String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn set_token(&self, namespace: TokenNamespace, token: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(namespace.storage_key(), token.to_string());
    }

    fn get_token(&self, namespace: TokenNamespace) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(namespace.storage_key())
            .cloned()
    }

    fn clear_token(&self, namespace: TokenNamespace) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(namespace.storage_key());
    }
}
