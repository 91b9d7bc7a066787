// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lesson grading.

use crate::error::{AppError, Result};
use crate::models::catalog::GradeResult;
use crate::models::LessonBody;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/lessons/{path_id}/{lesson_id}/grade",
        post(grade_lesson),
    )
}

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    /// Chosen option index per question
    pub answers: Vec<usize>,
}

/// Grade a multiple-choice lesson. Grading does not record progress; the
/// client reports completion through the progress update route.
async fn grade_lesson(
    State(state): State<Arc<AppState>>,
    Path((path_id, lesson_id)): Path<(String, String)>,
    payload: std::result::Result<Json<GradeRequest>, JsonRejection>,
) -> Result<Json<GradeResult>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let path = state
        .catalog
        .get(&path_id)
        .ok_or_else(|| AppError::path_not_found(&path_id))?;
    let lesson = path
        .lesson(&lesson_id)
        .ok_or_else(|| AppError::lesson_not_found(&path_id, &lesson_id))?;

    match &lesson.body {
        LessonBody::MultipleChoice(content) => Ok(Json(content.grade(&request.answers))),
        _ => Err(AppError::BadRequest(format!(
            "Lesson {} is not a multiple-choice lesson",
            lesson_id
        ))),
    }
}
