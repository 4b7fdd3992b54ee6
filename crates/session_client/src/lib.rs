//! Client SDK for Gatherly sessions.
//!
//! The pieces mirror the lifecycle of a session token on the client side:
//! a namespaced [`store::TokenStore`] persists the current token, the
//! advisory [`token::is_token_valid`] check reads its expiry without
//! verifying it (only the server can), the [`refresh::RefreshCoordinator`]
//! exchanges an expiring token for a fresh one, and the injectable
//! [`session::SessionContext`] carries the authenticated principal for
//! route guards.

pub mod api;
pub mod auth;
pub mod errors;
pub mod refresh;
pub mod session;
pub mod store;
pub mod token;

pub use api::ApiClient;
pub use errors::ClientError;
pub use refresh::RefreshCoordinator;
pub use session::SessionContext;
pub use store::{MemoryTokenStore, TokenNamespace, TokenStore};
