// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use artpath::config::Config;
use artpath::db::FirestoreDb;
use artpath::routes::create_router;
use artpath::services::{AssessmentService, PathCatalog, VisionClient};
use artpath::time_utils::FixedClock;
use artpath::AppState;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Monday morning, UTC.
#[allow(dead_code)]
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

/// The catalog shipped in data/, which lists typed lessons.
#[allow(dead_code)]
pub fn test_catalog() -> PathCatalog {
    PathCatalog::load_from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/data/learning_paths.json"
    ))
    .expect("Failed to load test catalog")
}

#[allow(dead_code)]
fn build_app(db: FirestoreDb, clock: Arc<FixedClock>) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let vision = VisionClient::new(
        config.vision_api_url.clone(),
        config.vision_api_key.clone(),
        config.vision_model.clone(),
    );

    let state = Arc::new(AppState {
        config,
        db,
        catalog: test_catalog(),
        assessment: AssessmentService::with_rng(vision, StdRng::seed_from_u64(7)),
        clock,
    });

    (create_router(state.clone()), state)
}

/// Create a test app backed by the in-memory store and a manual clock.
/// Returns the router, the shared state and the clock.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(start_time()));
    let (app, state) = build_app(FirestoreDb::new_in_memory(), clock.clone());
    (app, state, clock)
}

/// Create a test app whose store is unreachable.
#[allow(dead_code)]
pub fn create_offline_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(test_db_offline(), Arc::new(FixedClock::new(start_time())))
}

/// Create a session token for `user_id`.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    artpath::middleware::auth::create_jwt(user_id, Some("learner@example.com"), signing_key)
        .expect("Failed to create JWT")
}

/// Send a request and decode the JSON body (Null when empty).
#[allow(dead_code)]
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}

/// Authenticated GET.
#[allow(dead_code)]
pub fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Authenticated JSON POST.
#[allow(dead_code)]
pub fn post_json(uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
