// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Skill assessment routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::assessment::DeviceType;
use crate::models::{AssessmentResult, CatalogPath};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use validator::Validate;

/// Catalog listing; no auth needed so the landing page can show paths.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/assessment/paths", get(list_paths))
}

/// Assessment routes that need an authenticated user.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/assessment/analyze", post(analyze_drawing))
}

#[derive(Serialize)]
pub struct PathsResponse {
    pub paths: BTreeMap<String, CatalogPath>,
}

/// List all learning paths keyed by id.
async fn list_paths(State(state): State<Arc<AppState>>) -> Json<PathsResponse> {
    let paths = state
        .catalog
        .paths()
        .iter()
        .map(|p| (p.id.clone(), p.clone()))
        .collect();

    Json(PathsResponse { paths })
}

fn default_drawing_time() -> u32 {
    30
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeDrawingRequest {
    #[validate(url)]
    pub image_url: String,
    /// Seconds spent on the drawing
    #[serde(default = "default_drawing_time")]
    #[validate(range(min = 1, max = 3600))]
    pub drawing_time: u32,
    #[serde(default)]
    pub device_type: DeviceType,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: String,
}

#[derive(Serialize)]
pub struct ResponseUser {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<AuthUser> for ResponseUser {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.user_id,
            email: user.email,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentMetadata {
    pub drawing_time: u32,
    pub device_type: DeviceType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeDrawingResponse {
    pub success: bool,
    pub image_url: String,
    pub assessment: AssessmentResult,
    pub user: ResponseUser,
    pub metadata: AssessmentMetadata,
}

/// Assess a drawing and recommend a learning path.
///
/// Model failures do not surface here; the learner gets the fallback
/// assessment instead.
async fn analyze_drawing(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<AnalyzeDrawingRequest>, JsonRejection>,
) -> Result<Json<AnalyzeDrawingResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    tracing::info!(
        user_id = %user.user_id,
        drawing_time = request.drawing_time,
        device_type = ?request.device_type,
        "Starting skill assessment"
    );

    let assessment = state
        .assessment
        .assess(&request.image_url, request.drawing_time, state.clock.now())
        .await;

    Ok(Json(AnalyzeDrawingResponse {
        success: true,
        image_url: request.image_url,
        assessment,
        user: user.into(),
        metadata: AssessmentMetadata {
            drawing_time: request.drawing_time,
            device_type: request.device_type,
        },
    }))
}
