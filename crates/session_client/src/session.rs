//! Injectable session state for route guards.
//!
//! A [`SessionContext`] is an explicit context object handed to the UI's
//! routing layer; tests build isolated instances instead of sharing a
//! module-level singleton. `is_authenticated` is derived from the presence
//! of a user, so state and flag can never disagree.

use session_token::Principal;
use std::sync::Arc;
use tokio::sync::watch;

use crate::errors::ClientError;
use crate::store::{TokenNamespace, TokenStore};

struct Inner {
    store: Arc<dyn TokenStore>,
    namespace: TokenNamespace,
    user: watch::Sender<Option<Principal>>,
}

/// Shared session state for one token namespace.
///
/// Clones share state and observe each other's `login`/`logout`; this is
/// the invalidation seam multiple views (or tabs, through an embedder
/// bridge) hang off via [`SessionContext::changes`].
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

impl SessionContext {
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>, namespace: TokenNamespace) -> Self {
        let (user, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                store,
                namespace,
                user,
            }),
        }
    }

    /// Record the authenticated principal after a successful login.
    pub fn login(&self, principal: Principal) {
        self.inner.user.send_replace(Some(principal));
    }

    /// Clear the session: the persisted token first, then the in-memory
    /// user, so guard reads that follow never see a stale credential.
    /// Idempotent.
    pub fn logout(&self) {
        self.inner.store.clear_token(self.inner.namespace);
        self.inner.user.send_replace(None);
    }

    #[must_use]
    pub fn current_user(&self) -> Option<Principal> {
        self.inner.user.borrow().clone()
    }

    /// Derived authentication flag; always equals `current_user().is_some()`.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.user.borrow().is_some()
    }

    /// Route-guard read: the principal, or an error for the caller to route
    /// to a login entry point. Pure, no network or crypto involved.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] when no user is logged in.
    pub fn require_authenticated(&self) -> Result<Principal, ClientError> {
        self.current_user().ok_or(ClientError::NotAuthenticated)
    }

    /// Subscribe to session changes; every clone's `login`/`logout` is
    /// observed here.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<Option<Principal>> {
        self.inner.user.subscribe()
    }

    #[must_use]
    pub fn namespace(&self) -> TokenNamespace {
        self.inner.namespace
    }
}
