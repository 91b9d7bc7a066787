// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress routes: read a learner's record, apply lesson events, and show
//! per-path progress merged with the catalog.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::catalog::CatalogPath;
use crate::models::{LessonEvent, PathProgress, ProgressRecord};
use crate::services::progress;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Upper bound on XP a single lesson event may award.
pub const MAX_XP_PER_EVENT: u32 = 1000;

/// Progress routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/progress/user", get(get_user_progress))
        .route("/api/progress/update", post(update_progress))
        .route("/api/progress/path/{path_id}", get(get_path_progress))
}

// ─── User Progress ───────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProgressResponse {
    pub progress: ProgressRecord,
}

/// Get the caller's progress record.
///
/// Users without a stored record get a fresh one; nothing is written.
async fn get_user_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProgressResponse>> {
    let progress = state
        .db
        .get_progress(&user.user_id)
        .await?
        .map(progress::normalize)
        .unwrap_or_default();

    Ok(Json(UserProgressResponse { progress }))
}

// ─── Progress Update ─────────────────────────────────────────

/// Lesson event as sent by the client.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    #[validate(length(min = 1, max = 100))]
    pub path_id: String,
    #[validate(length(min = 1, max = 100))]
    pub lesson_id: String,
    /// Only counted for completions
    #[serde(default)]
    #[validate(range(max = MAX_XP_PER_EVENT))]
    pub xp_earned: Option<u32>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub started: bool,
}

impl UpdateProgressRequest {
    fn into_event(self) -> LessonEvent {
        LessonEvent::from_flags(
            self.path_id,
            self.lesson_id,
            self.xp_earned.unwrap_or(0),
            self.completed,
            self.started,
        )
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpdateProgressResponse {
    pub success: bool,
}

/// Apply one lesson event to the caller's progress.
///
/// Unknown paths, and lessons missing from a path that lists its lessons,
/// are rejected before anything is written. The engine runs
/// inside the store transaction and may run more than once if the
/// transaction is retried.
async fn update_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<UpdateProgressRequest>, JsonRejection>,
) -> Result<Json<UpdateProgressResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let catalog_path: CatalogPath = state
        .catalog
        .get(&request.path_id)
        .cloned()
        .ok_or_else(|| AppError::path_not_found(&request.path_id))?;

    // Paths declared only by lesson count accept any lesson id
    if !catalog_path.lessons.is_empty() && catalog_path.lesson(&request.lesson_id).is_none() {
        return Err(AppError::lesson_not_found(
            &request.path_id,
            &request.lesson_id,
        ));
    }

    let event = request.into_event();
    tracing::debug!(
        user_id = %user.user_id,
        path_id = %event.path_id,
        lesson_id = %event.lesson_id,
        action = ?event.action,
        "Applying lesson event"
    );

    let path_id = event.path_id.clone();
    let clock = state.clock.clone();
    let record = state
        .db
        .update_progress_atomic(&user.user_id, move |current| {
            progress::apply(current, &event, Some(&catalog_path), clock.now())
        })
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        path_id = %path_id,
        total_xp = record.total_xp,
        level = record.level,
        current_streak = record.current_streak,
        "Progress updated"
    );

    Ok(Json(UpdateProgressResponse { success: true }))
}

// ─── Path Progress ───────────────────────────────────────────

/// Catalog entry with the caller's progress attached.
#[derive(Serialize)]
pub struct PathDetail {
    #[serde(flatten)]
    pub catalog: CatalogPath,
    pub progress: PathProgress,
}

#[derive(Serialize)]
pub struct PathDetailResponse {
    pub path: PathDetail,
}

/// Get one path from the catalog together with the caller's progress on it.
async fn get_path_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(path_id): Path<String>,
) -> Result<Json<PathDetailResponse>> {
    let catalog_path = state
        .catalog
        .get(&path_id)
        .ok_or_else(|| AppError::path_not_found(&path_id))?;

    let record = state.db.get_progress(&user.user_id).await?;
    let stored = record
        .as_ref()
        .and_then(|r| r.active_paths.get(&path_id));

    Ok(Json(PathDetailResponse {
        path: PathDetail {
            catalog: catalog_path.clone(),
            progress: progress::merge_view(catalog_path, stored),
        },
    }))
}
