//! Refresh coordinator behavior against a counting in-process server.
//!
//! The mock endpoint records how many exchanges actually hit the network,
//! which is what the coalescing contract is about.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use session_client::{
    ApiClient, MemoryTokenStore, RefreshCoordinator, TokenNamespace, TokenStore,
    token::{is_token_valid, now_unix_seconds},
};
use session_token::{Principal, Role, issue};
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use std::time::Duration;
use tokio::time::sleep;

const SECRET: &[u8] = b"refresh-flow-test-secret";

#[derive(Clone, Copy)]
enum Behavior {
    /// Issue a fresh token.
    Issue,
    /// Respond `success: false` without a credential.
    Deny,
    /// Fail with a 500.
    Error,
}

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    saw_bearer: Arc<AtomicBool>,
    behavior: Behavior,
}

fn principal() -> Principal {
    Principal {
        id: "01J9QDCJ4W3B1T6H0Q2Y8R5KXE".to_string(),
        username: "olive".to_string(),
        role: Role::Organizer,
    }
}

async fn refresh_endpoint(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if headers.contains_key(AUTHORIZATION) {
        state.saw_bearer.store(true, Ordering::SeqCst);
    }

    // Hold the exchange open long enough for concurrent callers to queue.
    sleep(Duration::from_millis(50)).await;

    match state.behavior {
        Behavior::Issue => {
            let token =
                issue(principal(), SECRET, 3600, now_unix_seconds()).expect("token issues");
            Json(json!({ "success": true, "accessToken": token })).into_response()
        }
        Behavior::Deny => Json(json!({ "success": false })).into_response(),
        Behavior::Error => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn spawn_mock(behavior: Behavior) -> (String, Arc<AtomicUsize>, Arc<AtomicBool>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let saw_bearer = Arc::new(AtomicBool::new(false));
    let state = MockState {
        hits: hits.clone(),
        saw_bearer: saw_bearer.clone(),
        behavior,
    };

    let app = Router::new()
        .route("/v1/auth/refresh", post(refresh_endpoint))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port binds");
    let addr = listener.local_addr().expect("bound address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock serves");
    });

    (format!("http://{addr}"), hits, saw_bearer)
}

fn coordinator(base_url: &str, store: Arc<MemoryTokenStore>) -> RefreshCoordinator {
    let api = ApiClient::new(base_url).expect("client builds");
    RefreshCoordinator::new(api, store)
}

/// A token that advisory checks already consider stale.
fn stale_token() -> String {
    issue(principal(), SECRET, -10, now_unix_seconds()).expect("token issues")
}

#[tokio::test]
async fn absent_token_refuses_without_a_network_call() {
    let (base_url, hits, _) = spawn_mock(Behavior::Issue).await;
    let store = Arc::new(MemoryTokenStore::new());
    let coordinator = coordinator(&base_url, store);

    assert!(!coordinator.refresh_token(TokenNamespace::Organizer).await);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn successful_refresh_swaps_the_stored_token() {
    let (base_url, hits, saw_bearer) = spawn_mock(Behavior::Issue).await;
    let store = Arc::new(MemoryTokenStore::new());
    let old_token = stale_token();
    store.set_token(TokenNamespace::Organizer, &old_token);
    assert!(!is_token_valid(
        store.as_ref(),
        TokenNamespace::Organizer,
        now_unix_seconds()
    ));

    let coordinator = coordinator(&base_url, store.clone());
    assert!(coordinator.refresh_token(TokenNamespace::Organizer).await);

    // The old token is no longer retrievable and the new one checks out.
    let current = store
        .get_token(TokenNamespace::Organizer)
        .expect("token stored");
    assert_ne!(current, old_token);
    assert!(is_token_valid(
        store.as_ref(),
        TokenNamespace::Organizer,
        now_unix_seconds()
    ));

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(saw_bearer.load(Ordering::SeqCst), "exchange carries the bearer credential");
}

#[tokio::test]
async fn concurrent_refreshes_hit_the_endpoint_once() {
    let (base_url, hits, _) = spawn_mock(Behavior::Issue).await;
    let store = Arc::new(MemoryTokenStore::new());
    store.set_token(TokenNamespace::Organizer, &stale_token());

    let coordinator = coordinator(&base_url, store);

    let (a, b, c, d) = tokio::join!(
        coordinator.refresh_token(TokenNamespace::Organizer),
        coordinator.refresh_token(TokenNamespace::Organizer),
        coordinator.refresh_token(TokenNamespace::Organizer),
        coordinator.refresh_token(TokenNamespace::Organizer),
    );

    assert!(a && b && c && d, "every caller shares the winning outcome");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn namespaces_refresh_independently() {
    let (base_url, hits, _) = spawn_mock(Behavior::Issue).await;
    let store = Arc::new(MemoryTokenStore::new());
    store.set_token(TokenNamespace::Session, &stale_token());
    store.set_token(TokenNamespace::Organizer, &stale_token());

    let coordinator = coordinator(&base_url, store);

    let (a, b) = tokio::join!(
        coordinator.refresh_token(TokenNamespace::Session),
        coordinator.refresh_token(TokenNamespace::Organizer),
    );

    assert!(a && b);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn denied_refresh_keeps_the_existing_token() {
    let (base_url, hits, _) = spawn_mock(Behavior::Deny).await;
    let store = Arc::new(MemoryTokenStore::new());
    let old_token = stale_token();
    store.set_token(TokenNamespace::Session, &old_token);

    let coordinator = coordinator(&base_url, store.clone());
    assert!(!coordinator.refresh_token(TokenNamespace::Session).await);

    assert_eq!(
        store.get_token(TokenNamespace::Session),
        Some(old_token),
        "a failed refresh must not clear the token; logout is the caller's call"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn server_error_recovers_locally() {
    let (base_url, _, _) = spawn_mock(Behavior::Error).await;
    let store = Arc::new(MemoryTokenStore::new());
    let old_token = stale_token();
    store.set_token(TokenNamespace::Session, &old_token);

    let coordinator = coordinator(&base_url, store.clone());
    assert!(!coordinator.refresh_token(TokenNamespace::Session).await);
    assert_eq!(store.get_token(TokenNamespace::Session), Some(old_token));
}

#[tokio::test]
async fn unreachable_server_recovers_locally() {
    // Nothing listens on this port.
    let store = Arc::new(MemoryTokenStore::new());
    store.set_token(TokenNamespace::Session, &stale_token());

    let coordinator = coordinator("http://127.0.0.1:9", store.clone());
    assert!(!coordinator.refresh_token(TokenNamespace::Session).await);
    assert!(store.get_token(TokenNamespace::Session).is_some());
}
