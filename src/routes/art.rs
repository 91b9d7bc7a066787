// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Free-form artwork critique.

use super::assessment::ResponseUser;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::assessment::ArtworkAnalysis;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/art/analyze", post(analyze_artwork))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeArtworkRequest {
    #[validate(url)]
    pub image_url: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeArtworkResponse {
    pub success: bool,
    pub image_url: String,
    pub analysis: ArtworkAnalysis,
    pub user: ResponseUser,
}

/// Critique an artwork. Unlike assessments there is no fallback: a model
/// failure is reported as 502.
async fn analyze_artwork(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<AnalyzeArtworkRequest>, JsonRejection>,
) -> Result<Json<AnalyzeArtworkResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let vision = state.assessment.vision();
    let feedback = vision
        .critique_artwork(&request.image_url, &request.notes)
        .await?;

    tracing::info!(user_id = %user.user_id, "Artwork analyzed");

    Ok(Json(AnalyzeArtworkResponse {
        success: true,
        image_url: request.image_url,
        analysis: ArtworkAnalysis {
            feedback,
            timestamp: format_utc_rfc3339(state.clock.now()),
            model: vision.model().to_string(),
        },
        user: user.into(),
    }))
}
