//! Silent token refresh with per-namespace coalescing.
//!
//! Two near-simultaneous refreshes of the same namespace would otherwise
//! race: both spend the old credential, and whichever lands second clobbers
//! the other's freshly issued token. The coordinator serializes the
//! exchange behind one async mutex per namespace; queued callers re-check
//! the store after acquiring it and reuse the winner's result.

use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::api::ApiClient;
use crate::store::{TokenNamespace, TokenStore};

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    success: bool,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

pub struct RefreshCoordinator {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
    session_lock: Mutex<()>,
    organizer_lock: Mutex<()>,
}

impl RefreshCoordinator {
    #[must_use]
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            session_lock: Mutex::new(()),
            organizer_lock: Mutex::new(()),
        }
    }

    fn lock_for(&self, namespace: TokenNamespace) -> &Mutex<()> {
        match namespace {
            TokenNamespace::Session => &self.session_lock,
            TokenNamespace::Organizer => &self.organizer_lock,
        }
    }

    /// Exchange the stored token for a fresh one.
    ///
    /// Returns `false` without a network call when no token is stored.
    /// On success the stored token is replaced and `true` returned. On any
    /// failure (network error, non-success response, missing credential in
    /// the response) the existing token is left in place and `false`
    /// returned; whether to log out is the caller's decision. Never panics
    /// or propagates an error past this boundary.
    pub async fn refresh_token(&self, namespace: TokenNamespace) -> bool {
        let Some(current) = self.store.get_token(namespace) else {
            return false;
        };

        let _guard = self.lock_for(namespace).lock().await;

        match self.store.get_token(namespace) {
            // A concurrent caller completed the exchange while this one
            // waited on the lock; reuse its token instead of spending the
            // old credential a second time.
            Some(token) if token != current => true,
            Some(token) => self.exchange(namespace, &token).await,
            None => false,
        }
    }

    async fn exchange(&self, namespace: TokenNamespace, token: &str) -> bool {
        let result: Result<RefreshResponse, _> = self
            .api
            .post_empty("/v1/auth/refresh", Some(token))
            .await;

        match result {
            Ok(RefreshResponse {
                success: true,
                access_token: Some(new_token),
            }) => {
                self.store.set_token(namespace, &new_token);
                true
            }
            Ok(_) => {
                debug!("refresh for {namespace} returned no credential");
                false
            }
            Err(err) => {
                debug!("refresh for {namespace} failed: {err}");
                false
            }
        }
    }
}
