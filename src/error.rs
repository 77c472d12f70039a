//! Error types for the fichamento server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentError;
use crate::pipeline::ExtractError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Upload error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Extract(e) => match e {
                ExtractError::SourceUnavailable => (
                    StatusCode::BAD_REQUEST,
                    "source_unavailable",
                    "Select a PDF file before extracting".to_string(),
                ),
                ExtractError::EmptyInput => (
                    StatusCode::BAD_REQUEST,
                    "empty_input",
                    "Paste some text to process".to_string(),
                ),
                ExtractError::UnreadableDocument(DocumentError::Unsupported(msg)) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "unsupported_document",
                    msg.clone(),
                ),
                ExtractError::UnreadableDocument(inner) => {
                    tracing::warn!("Unreadable document: {}", inner);
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "unreadable_document",
                        "The PDF could not be read (corrupted or unsupported file)".to_string(),
                    )
                }
            },
            AppError::Multipart(e) => (
                e.status(),
                "upload_error",
                e.body_text(),
            ),
            AppError::Json(e) => (
                StatusCode::BAD_REQUEST,
                "invalid_json",
                format!("Invalid JSON: {}", e),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
