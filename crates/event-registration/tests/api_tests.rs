//! Integration tests for the registration API.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use event_registration::{
    api::{create_router, AppState},
    config::DatabaseConfig,
    store::with_write_timeout,
    Identity, MemoryStore, Registration, RegistrationStore, StoreError, SurrealStore,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Store whose writes are never acknowledged within the write limit.
struct StalledStore;

#[async_trait]
impl RegistrationStore for StalledStore {
    async fn create(&self, _registration: Registration) -> Result<Identity, StoreError> {
        with_write_timeout(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Identity::new("never"))
        })
        .await
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "stalled"
    }
}

/// Create a test app backed by an in-memory store.
fn create_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = create_router(AppState::new(store.clone()));
    (app, store)
}

fn scenario_payload() -> Value {
    json!({
        "event": "Hackathon",
        "teamName": "Alpha",
        "teamLeader": "Asha",
        "phoneNo": "9876543210",
        "email": "a@b.com",
        "rollNo": "R1",
        "members": ["Asha", "Vik"]
    })
}

fn register_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn post_register(app: Router, payload: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(register_request(payload.to_string()))
        .await
        .unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}

#[tokio::test]
async fn test_valid_registration_is_persisted() {
    let (app, store) = create_test_app();

    let (status, json) = post_register(app, &scenario_payload()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Registration successful!");

    let records = store.list().await;
    assert_eq!(records.len(), 1);
    assert_eq!(json["id"], records[0].id.as_str());

    let stored = &records[0].registration;
    assert_eq!(stored.event(), "Hackathon");
    assert_eq!(stored.team_name(), "Alpha");
    assert_eq!(stored.team_leader(), "Asha");
    assert_eq!(stored.phone_no(), "9876543210");
    assert_eq!(stored.email(), "a@b.com");
    assert_eq!(stored.roll_no(), "R1");
    assert_eq!(stored.members(), ["Asha", "Vik"]);
}

#[tokio::test]
async fn test_missing_roll_no_is_rejected() {
    let (app, store) = create_test_app();
    let mut payload = scenario_payload();
    payload.as_object_mut().unwrap().remove("rollNo");

    let (status, json) = post_register(app, &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "All fields are required.");
    assert_eq!(json["errors"], json!(["rollNo is required"]));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_every_required_field_is_checked() {
    for field in ["event", "teamName", "teamLeader", "phoneNo", "email", "rollNo"] {
        let (app, store) = create_test_app();
        let mut payload = scenario_payload();
        payload[field] = json!("");

        let (status, json) = post_register(app, &payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "field {}", field);
        assert_eq!(json["message"], "All fields are required.");
        assert!(store.is_empty().await);
    }
}

#[tokio::test]
async fn test_short_phone_number_is_rejected() {
    let (app, store) = create_test_app();
    let mut payload = scenario_payload();
    payload["phoneNo"] = json!("12345");

    let (status, json) = post_register(app, &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Phone number must be 10 digits long");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let (app, store) = create_test_app();
    let mut payload = scenario_payload();
    payload["email"] = json!("asha.example.com");

    let (status, json) = post_register(app, &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid email format");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_blank_members_are_rejected() {
    let (app, store) = create_test_app();
    let mut payload = scenario_payload();
    payload["members"] = json!(["", "   "]);

    let (status, json) = post_register(app, &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "At least one valid team member name is required."
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (app, store) = create_test_app();

    let response = app.oneshot(register_request("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Request body must be a JSON object.");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_store_failure_returns_generic_error() {
    let store = Arc::new(MemoryStore::unavailable());
    let app = create_router(AppState::new(store.clone()));

    let (status, json) = post_register(app, &scenario_payload()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["message"],
        "An error occurred while saving data. Please try again."
    );
    assert!(json.get("errors").is_none());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_write_timeout_returns_generic_error() {
    let app = create_router(AppState::new(Arc::new(StalledStore)));

    let (status, json) = post_register(app, &scenario_payload()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["message"],
        "An error occurred while saving data. Please try again."
    );
}

#[tokio::test]
async fn test_duplicate_submission_creates_two_records() {
    let (app, store) = create_test_app();

    let (first_status, first) = post_register(app.clone(), &scenario_payload()).await;
    let (second_status, second) = post_register(app, &scenario_payload()).await;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::CREATED);
    assert_ne!(first["id"], second["id"]);
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _store) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["store"], "memory");
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn test_health_reports_degraded_store() {
    let store = Arc::new(MemoryStore::unavailable());
    let app = create_router(AppState::new(store));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn test_registration_with_embedded_surrealdb() {
    let store = SurrealStore::connect(&DatabaseConfig::in_memory())
        .await
        .unwrap();
    let app = create_router(AppState::new(Arc::new(store)));

    let (status, json) = post_register(app, &scenario_payload()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(json["id"].as_str().unwrap().starts_with("registration:"));
}
