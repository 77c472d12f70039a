//! Route modules for the fichamento server

pub mod categories;
pub mod citations;
pub mod export;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    ocr_enabled: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        ocr_enabled: state.ocr().has_providers(),
    })
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let max_upload = state.config().max_upload_bytes();

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/health", get(health_check))
        .nest("/api/v1/citations", citations::router(max_upload))
        .nest("/api/v1/categories", categories::router())
        .nest("/api/v1", export::router())
        .with_state(state)
}
