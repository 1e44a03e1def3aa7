//! Mock backend tests for the Vantage client.
//!
//! These tests use wiremock to simulate the analytics backend and test
//! the dispatcher's credential policy and the session lifecycle without
//! network access or a real server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vantage_core::error::{AuthError, Error};
use vantage_core::{AccessToken, ApiUrl, Credentials, MemoryTokenStore, TokenStore};
use vantage_http::{Dispatcher, InvalidationHook, SessionController, SessionState, endpoints};

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(&format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// Invalidation hook that counts how often it fires.
#[derive(Default)]
struct CountingHook {
    fired: AtomicUsize,
}

impl InvalidationHook for CountingHook {
    fn session_invalidated(&self) {
        self.fired.fetch_add(1, Ordering::SeqCst);
    }
}

fn user_body() -> serde_json::Value {
    json!({
        "id": 1,
        "email": "admin@example.com",
        "role": "admin",
        "organization_id": 1,
        "created_at": "2026-01-15T09:30:00Z"
    })
}

// ============================================================================
// Session Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn login_persists_token_and_resolves_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_string_contains("username=admin%40example.com"))
        .and(body_string_contains("password=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc123",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let dispatcher = Dispatcher::new(mock_api_url(&server), store.clone());
    let session = SessionController::new(dispatcher);

    let credentials = Credentials::new("admin@example.com", "password");
    let user = session.login(&credentials).await.unwrap();

    assert_eq!(user.email, "admin@example.com");
    assert_eq!(store.get().unwrap().as_str(), "abc123");
    assert_eq!(session.current_user().unwrap().email, "admin@example.com");
}

#[tokio::test]
async fn login_invalid_credentials_leaves_store_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let dispatcher = Dispatcher::new(mock_api_url(&server), store.clone());
    let session = SessionController::new(dispatcher);

    let credentials = Credentials::new("bad@example.com", "wrongpass");
    let result = session.login(&credentials).await;

    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::InvalidCredentials))
    ));
    assert!(store.get().is_none());
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn logout_clears_store_and_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("abc123")));
    let dispatcher = Dispatcher::new(mock_api_url(&server), store.clone());
    let session = SessionController::new(dispatcher);

    session.hydrate().await;
    assert!(session.current_user().is_some());

    session.logout();

    assert!(store.get().is_none());
    assert!(session.current_user().is_none());
    assert_eq!(session.state(), SessionState::Anonymous);
}

// ============================================================================
// Hydration Tests
// ============================================================================

#[tokio::test]
async fn hydrate_without_token_skips_network_call() {
    let server = MockServer::start().await;

    // Startup with an empty store must not touch /auth/me at all.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let dispatcher = Dispatcher::new(mock_api_url(&server), store);
    let session = SessionController::new(dispatcher);

    assert_eq!(session.state(), SessionState::Unknown);
    let state = session.hydrate().await;

    assert_eq!(state, SessionState::Anonymous);
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn hydrate_with_valid_token_authenticates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("abc123")));
    let dispatcher = Dispatcher::new(mock_api_url(&server), store);
    let session = SessionController::new(dispatcher);

    let state = session.hydrate().await;

    match state {
        SessionState::Authenticated(user) => assert_eq!(user.email, "admin@example.com"),
        other => panic!("expected Authenticated, got {:?}", other),
    }
}

#[tokio::test]
async fn hydrate_with_stale_token_ends_anonymous_with_empty_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Could not validate credentials"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("expired")));
    let dispatcher = Dispatcher::new(mock_api_url(&server), store.clone());
    let session = SessionController::new(dispatcher);

    let state = session.hydrate().await;

    assert_eq!(state, SessionState::Anonymous);
    assert!(store.get().is_none());
}

// ============================================================================
// Dispatcher Policy Tests
// ============================================================================

#[tokio::test]
async fn authenticated_request_carries_exact_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ai/anomalies"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "feature_id": 3,
            "feature_name": "exports",
            "score": 4.2,
            "details": { "z_event_count": 4.2 }
        }])))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("abc123")));
    let dispatcher = Dispatcher::new(mock_api_url(&server), store);

    let anomalies = endpoints::anomalies(&dispatcher).await.unwrap();
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].feature_name.as_deref(), Some("exports"));
}

#[tokio::test]
async fn unauthorized_with_token_clears_store_and_fires_hook_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/usage-summary"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Could not validate credentials"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("expired")));
    let hook = Arc::new(CountingHook::default());
    let dispatcher = Dispatcher::with_hook(mock_api_url(&server), store.clone(), hook.clone());

    let result = endpoints::usage_summary(&dispatcher).await;

    assert!(matches!(result, Err(Error::Auth(AuthError::SessionExpired))));
    assert!(store.get().is_none());
    assert_eq!(hook.fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unauthorized_without_token_takes_no_action() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/usage-summary"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Not authenticated"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let hook = Arc::new(CountingHook::default());
    let dispatcher = Dispatcher::with_hook(mock_api_url(&server), store.clone(), hook.clone());

    let result = endpoints::usage_summary(&dispatcher).await;

    match result {
        Err(Error::Api(e)) => assert_eq!(e.status, 401),
        other => panic!("expected Api error, got {:?}", other.err()),
    }
    assert!(store.get().is_none());
    assert_eq!(hook.fired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn second_unauthorized_after_clear_does_not_refire_hook() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/usage-summary"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Could not validate credentials"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("expired")));
    let hook = Arc::new(CountingHook::default());
    let dispatcher = Dispatcher::with_hook(mock_api_url(&server), store.clone(), hook.clone());

    // First failure observes the token and invalidates the session.
    let first = endpoints::usage_summary(&dispatcher).await;
    assert!(matches!(first, Err(Error::Auth(AuthError::SessionExpired))));

    // A later request observes the cleared store; same net state, no
    // second invalidation.
    let second = endpoints::usage_summary(&dispatcher).await;
    assert!(matches!(second, Err(Error::Api(_))));
    assert!(store.get().is_none());
    assert_eq!(hook.fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn upstream_error_keeps_token_and_surfaces_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ai/usage-insights"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "insight generation failed"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("abc123")));
    let hook = Arc::new(CountingHook::default());
    let dispatcher = Dispatcher::with_hook(mock_api_url(&server), store.clone(), hook.clone());

    let result = endpoints::usage_insights(&dispatcher).await;

    match result {
        Err(Error::Api(e)) => {
            assert_eq!(e.status, 500);
            assert_eq!(e.detail.as_deref(), Some("insight generation failed"));
        }
        other => panic!("expected Api error, got {:?}", other.err()),
    }
    // Non-401 failures never invalidate the session.
    assert_eq!(store.get().unwrap().as_str(), "abc123");
    assert_eq!(hook.fired.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Data Access Tests
// ============================================================================

#[tokio::test]
async fn user_activity_passes_days_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/user-activity"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "user_id": 2,
            "email": "carol@example.com",
            "event_count": 42,
            "avg_session_duration": 18.5
        }])))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("abc123")));
    let dispatcher = Dispatcher::new(mock_api_url(&server), store);

    let activity = endpoints::user_activity(&dispatcher, 7).await.unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].event_count, 42);
}

#[tokio::test]
async fn chart_data_decodes_full_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ai/chart-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feature_z_scores": [{
                "feature_id": 1,
                "feature_name": "search",
                "z_event_count": 0.4,
                "z_avg_session": -0.2,
                "z_dau": 1.1,
                "norm_score": 1.2,
                "is_anomaly": false
            }],
            "z_distribution": [
                { "bucket": "0-1", "count": 4 },
                { "bucket": "4+", "count": 1 }
            ],
            "feature_metrics": [{
                "feature_id": 1,
                "feature_name": "search",
                "event_count": 120,
                "avg_session_duration": 33.5,
                "daily_active_users": 14
            }],
            "threshold": 2.0,
            "mean_event_count": 100.0,
            "std_event_count": 25.0,
            "mean_session": 30.0,
            "std_session": 5.0,
            "mean_dau": 12.0,
            "std_dau": 3.0
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("abc123")));
    let dispatcher = Dispatcher::new(mock_api_url(&server), store);

    let chart = endpoints::chart_data(&dispatcher).await.unwrap();
    assert_eq!(chart.feature_z_scores.len(), 1);
    assert_eq!(chart.z_distribution[1].bucket, "4+");
    assert!(!chart.feature_z_scores[0].is_anomaly);
    assert_eq!(chart.threshold, 2.0);
}
