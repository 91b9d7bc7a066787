// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Assessment, artwork critique and lesson grading routes.
//!
//! The test config has no vision API key, so assessments exercise the
//! fallback analysis and critiques fail upstream.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

mod common;
use common::{create_test_app, create_test_jwt, post_json, send};

const IMAGE_URL: &str = "https://example.com/drawings/circle.png";

#[tokio::test]
async fn test_paths_listing_keyed_by_id() {
    let (app, _, _) = create_test_app();

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/assessment/paths")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert_eq!(paths.len(), 3);
    assert_eq!(paths["foundation_builder"]["title"], "Foundation Builder");
    assert_eq!(paths["master_class"]["lessonCount"], 25);
}

#[tokio::test]
async fn test_analyze_without_model_uses_fallback() {
    let (app, state, _) = create_test_app();
    let token = create_test_jwt("user-assess", &state.config.jwt_signing_key);

    let (status, body) = send(
        &app,
        post_json(
            "/api/assessment/analyze",
            &token,
            json!({ "imageUrl": IMAGE_URL, "drawingTime": 45, "deviceType": "mobile" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["imageUrl"], IMAGE_URL);
    assert_eq!(body["user"]["id"], "user-assess");
    assert_eq!(body["user"]["email"], "learner@example.com");
    assert_eq!(body["metadata"], json!({ "drawingTime": 45, "deviceType": "mobile" }));

    let assessment = &body["assessment"];
    assert_eq!(assessment["skillLevel"], "some_experience");
    assert_eq!(assessment["recommendedPath"], "foundation_builder");
    assert_eq!(assessment["firstLesson"]["id"], "foundation-01");
    assert_eq!(assessment["model"], "test-vision-model-assessment");
    assert_eq!(assessment["timestamp"], "2024-01-15T09:00:00.000Z");
    assert_eq!(assessment["positives"].as_array().unwrap().len(), 3);
    assert!(!assessment["encouragement"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_defaults_metadata() {
    let (app, state, _) = create_test_app();
    let token = create_test_jwt("user-assess", &state.config.jwt_signing_key);

    let (status, body) = send(
        &app,
        post_json("/api/assessment/analyze", &token, json!({ "imageUrl": IMAGE_URL })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"], json!({ "drawingTime": 30, "deviceType": "web" }));
}

#[tokio::test]
async fn test_analyze_rejects_missing_image() {
    let (app, state, _) = create_test_app();
    let token = create_test_jwt("user-assess", &state.config.jwt_signing_key);

    let (status, body) = send(
        &app,
        post_json("/api/assessment/analyze", &token, json!({ "drawingTime": 30 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_artwork_critique_failure_is_bad_gateway() {
    let (app, state, _) = create_test_app();
    let token = create_test_jwt("user-art", &state.config.jwt_signing_key);

    let (status, body) = send(
        &app,
        post_json(
            "/api/art/analyze",
            &token,
            json!({ "imageUrl": IMAGE_URL, "notes": "charcoal study" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "vision_api_error");
}

#[tokio::test]
async fn test_grade_multiple_choice_lesson() {
    let (app, state, _) = create_test_app();
    let token = create_test_jwt("user-quiz", &state.config.jwt_signing_key);

    let (status, body) = send(
        &app,
        post_json(
            "/api/lessons/foundation_builder/circle-theory/grade",
            &token,
            json!({ "answers": [0, 2] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "correct": 1, "total": 2, "passed": true, "answers": [true, false] })
    );
}

#[tokio::test]
async fn test_grade_with_missing_answers() {
    let (app, state, _) = create_test_app();
    let token = create_test_jwt("user-quiz", &state.config.jwt_signing_key);

    let (status, body) = send(
        &app,
        post_json(
            "/api/lessons/foundation_builder/circle-theory/grade",
            &token,
            json!({ "answers": [] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"], false);
    assert_eq!(body["answers"], json!([null, null]));
}

#[tokio::test]
async fn test_grade_errors() {
    let (app, state, _) = create_test_app();
    let token = create_test_jwt("user-quiz", &state.config.jwt_signing_key);
    let answers = json!({ "answers": [0] });

    let (status, body) = send(
        &app,
        post_json("/api/lessons/nowhere/circle-theory/grade", &token, answers.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Learning path nowhere not found");

    let (status, _) = send(
        &app,
        post_json("/api/lessons/foundation_builder/missing/grade", &token, answers.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        post_json("/api/lessons/foundation_builder/your-first-circle/grade", &token, answers),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
