//! Integration tests for the `/event` gateway route.
//!
//! Drives the full router with `tower::ServiceExt::oneshot` against mock
//! collaborators, checking the status/body contract of every pipeline stage
//! and that the store and prediction service are called exactly when they
//! should be.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bytes::Bytes;
use crease_client::{EventStore, EventStoreError, NextBall, NextBallError};
use crease_core::DeliveryEvent;
use crease_server::server::build_router;
use crease_server::state::AppState;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Mock collaborators
// ---------------------------------------------------------------------------

enum StoreBehaviour {
    Accept,
    EmptyId,
    Fail,
}

struct MockStore {
    behaviour: StoreBehaviour,
    pushes: AtomicUsize,
}

impl MockStore {
    fn new(behaviour: StoreBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            pushes: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl EventStore for MockStore {
    async fn push_event(
        &self,
        _event: &DeliveryEvent,
        _require_ack: bool,
    ) -> Result<String, EventStoreError> {
        self.pushes.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            StoreBehaviour::Accept => Ok("5f4e9a10-8c5d-4c6e-9d2b-3a1f0e7b6c44".to_string()),
            StoreBehaviour::EmptyId => Ok(String::new()),
            StoreBehaviour::Fail => Err(EventStoreError::Api {
                status: StatusCode::BAD_GATEWAY,
                body: "store offline".to_string(),
            }),
        }
    }
}

enum NextBehaviour {
    Hint(&'static str),
    Empty,
    Unreachable,
}

struct MockNextBall {
    behaviour: NextBehaviour,
    calls: AtomicUsize,
}

impl MockNextBall {
    fn new(behaviour: NextBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl NextBall for MockNextBall {
    async fn next_event(&self, _match_id: i64) -> Result<Bytes, NextBallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            NextBehaviour::Hint(hint) => Ok(Bytes::from_static(hint.as_bytes())),
            NextBehaviour::Empty => Ok(Bytes::new()),
            NextBehaviour::Unreachable => {
                Err(NextBallError::Url(url::Url::parse("http://").unwrap_err()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app(
    store_behaviour: StoreBehaviour,
    next_behaviour: NextBehaviour,
) -> (Router, Arc<MockStore>, Arc<MockNextBall>) {
    let store = MockStore::new(store_behaviour);
    let next_ball = MockNextBall::new(next_behaviour);
    let router = build_router(AppState::new(store.clone(), next_ball.clone()));
    (router, store, next_ball)
}

fn valid_delivery() -> String {
    r#"{
        "match": 42,
        "eventType": "delivery",
        "timestamp": "2017-03-21T10:15:00Z",
        "ball": {
            "battingTeam": {"id": 1, "name": "Australia"},
            "fieldingTeam": {"id": 2, "name": "England"},
            "innings": 1,
            "over": 12,
            "ball": 3
        },
        "runs": 4,
        "batsmen": {
            "striker": {"id": 10, "name": "S. Smith"},
            "nonStriker": {"id": 11, "name": "D. Warner"}
        },
        "bowler": {"id": 20, "name": "J. Anderson"}
    }"#
    .to_string()
}

fn post_event(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("build request")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

// ---------------------------------------------------------------------------
// Pipeline stage contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_delivery_is_persisted_and_hint_returned_verbatim() {
    let hint = r#"{"eventType":"delivery","over":12,"ball":4}"#;
    let (app, store, next_ball) = app(StoreBehaviour::Accept, NextBehaviour::Hint(hint));

    let response = app.oneshot(post_event("/event", valid_delivery())).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_string(response).await, hint);
    assert_eq!(store.pushes.load(Ordering::SeqCst), 1);
    assert_eq!(next_ball.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn next_event_false_skips_the_prediction_service() {
    let (app, store, next_ball) = app(StoreBehaviour::Accept, NextBehaviour::Hint("unused"));

    let response = app
        .oneshot(post_event("/event?nextEvent=false", valid_delivery()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_string(response).await, "");
    assert_eq!(store.pushes.load(Ordering::SeqCst), 1);
    assert_eq!(next_ball.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_hint_falls_through_to_plain_success() {
    let (app, store, next_ball) = app(StoreBehaviour::Accept, NextBehaviour::Empty);

    let response = app.oneshot(post_event("/event", valid_delivery())).await.unwrap();

    // "No next event" is a legitimate terminal match state, not an error.
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_string(response).await, "");
    assert_eq!(store.pushes.load(Ordering::SeqCst), 1);
    assert_eq!(next_ball.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unparseable_body_is_a_server_fault_and_never_persisted() {
    let (app, store, _) = app(StoreBehaviour::Accept, NextBehaviour::Empty);

    let response = app
        .oneshot(post_event("/event", "this is not json".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.starts_with("Failed to parse event:"));
    assert_eq!(store.pushes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn field_rule_violation_echoes_the_diagnostic() {
    let (app, store, _) = app(StoreBehaviour::Accept, NextBehaviour::Empty);

    let body = valid_delivery().replace(r#""match": 42"#, r#""match": 0"#);
    let response = app.oneshot(post_event("/event", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.starts_with("Invalid event passed -"), "body was: {body}");
    assert_eq!(store.pushes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn semantically_invalid_delivery_gets_the_generic_rejection() {
    let (app, store, _) = app(StoreBehaviour::Accept, NextBehaviour::Empty);

    // Striker and non-striker are the same player.
    let body = valid_delivery().replace(
        r#""nonStriker": {"id": 11, "name": "D. Warner"}"#,
        r#""nonStriker": {"id": 10, "name": "S. Smith"}"#,
    );
    let response = app.oneshot(post_event("/event", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "Invalid delivery received");
    assert_eq!(store.pushes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_failure_reports_500_and_skips_enrichment() {
    let (app, store, next_ball) = app(StoreBehaviour::Fail, NextBehaviour::Hint("unused"));

    let response = app.oneshot(post_event("/event", valid_delivery())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.starts_with("Failed to push event:"));
    assert_eq!(store.pushes.load(Ordering::SeqCst), 1);
    assert_eq!(next_ball.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_store_id_is_a_silent_failure() {
    let (app, _, next_ball) = app(StoreBehaviour::EmptyId, NextBehaviour::Hint("unused"));

    let response = app.oneshot(post_event("/event", valid_delivery())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Internal server error");
    assert_eq!(next_ball.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn prediction_failure_reports_500_after_the_durable_write() {
    let (app, store, _) = app(StoreBehaviour::Accept, NextBehaviour::Unreachable);

    let response = app.oneshot(post_event("/event", valid_delivery())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.starts_with("Error from next ball processor -"));
    // The write happened before the enrichment failure and is not rolled back.
    assert_eq!(store.pushes.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Protocol surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn options_preflight_returns_200_with_cors_headers() {
    let (app, store, next_ball) = app(StoreBehaviour::Accept, NextBehaviour::Empty);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/event")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["content-type"], "application/json; charset=UTF-8");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(
        headers["access-control-allow-headers"],
        "Accept, Content-Type, Content-Length, Accept-Encoding, Authorization"
    );
    assert_eq!(body_string(response).await, "");
    assert_eq!(store.pushes.load(Ordering::SeqCst), 0);
    assert_eq!(next_ball.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cors_headers_are_present_on_post_responses_too() {
    let (app, _, _) = app(StoreBehaviour::Accept, NextBehaviour::Empty);

    let response = app.oneshot(post_event("/event", valid_delivery())).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn other_methods_are_rejected_with_405() {
    for method in ["PUT", "DELETE", "PATCH"] {
        let (app, store, _) = app(StoreBehaviour::Accept, NextBehaviour::Empty);

        let request = Request::builder()
            .method(method)
            .uri("/event")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "method {method}");
        assert_eq!(body_string(response).await, "");
        assert_eq!(store.pushes.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let (app, _, _) = app(StoreBehaviour::Accept, NextBehaviour::Empty);

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
}
