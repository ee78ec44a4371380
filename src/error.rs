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
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Atlas API error: {0}")]
    AtlasApi(String),

    #[error("Invalid import file: {0}")]
    InvalidImport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Marker message for upstream 404s, so callers can distinguish
    /// "campaign does not exist" from transport failures.
    pub const ATLAS_NOT_FOUND: &'static str = "atlas_not_found";

    /// True if this error came from the upstream API answering 404.
    pub fn is_atlas_not_found(&self) -> bool {
        matches!(self, AppError::AtlasApi(msg) if msg == Self::ATLAS_NOT_FOUND)
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
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::AtlasApi(_) if self.is_atlas_not_found() => (
                StatusCode::NOT_FOUND,
                "not_found",
                Some("Campaign not found on the Atlas API".to_string()),
            ),
            AppError::AtlasApi(msg) => (StatusCode::BAD_GATEWAY, "atlas_error", Some(msg.clone())),
            AppError::InvalidImport(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_import", Some(msg.clone()))
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
