//! Export Routes
//!
//! Endpoints:
//! - GET /api/v1/export - Download the last run as plain text
//! - POST /api/v1/clear - Forget the last run

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::abnt::EXPORT_FILE_NAME;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Serialize)]
struct ClearResponse {
    message: &'static str,
}

/// Create the export router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(download_export))
        .route("/clear", post(clear_run))
}

/// GET /api/v1/export
async fn download_export(State(state): State<AppState>) -> Result<Response> {
    let session = state.session().read().await;
    let text = session
        .last_export()
        .ok_or_else(|| AppError::NotFound("Nothing to export".to_string()))?
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        text,
    )
        .into_response())
}

/// POST /api/v1/clear
async fn clear_run(State(state): State<AppState>) -> Json<ClearResponse> {
    state.session().write().await.clear();
    tracing::debug!("Cleared last run");
    Json(ClearResponse {
        message: "Citations cleared",
    })
}
