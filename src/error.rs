// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Vision API error: {0}")]
    VisionApi(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Error for a path id the catalog does not know.
    pub fn path_not_found(path_id: &str) -> Self {
        AppError::NotFound(format!("Learning path {} not found", path_id))
    }

    /// Error for a lesson id the path does not list.
    pub fn lesson_not_found(path_id: &str, lesson_id: &str) -> Self {
        AppError::NotFound(format!(
            "Lesson {} not found in path {}",
            lesson_id, path_id
        ))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string(), None),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "invalid_token".to_string(), None)
            }
            // The message itself is the error string clients display.
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request".to_string(),
                Some(msg.clone()),
            ),
            AppError::VisionApi(msg) => (
                StatusCode::BAD_GATEWAY,
                "vision_api_error".to_string(),
                Some(msg.clone()),
            ),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error".to_string(),
                    None,
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse { error, details };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
