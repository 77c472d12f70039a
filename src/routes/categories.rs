//! Category Routes
//!
//! Names for color buckets. Labels only change export headings.
//!
//! Endpoints:
//! - GET /api/v1/categories - All labels
//! - PUT /api/v1/categories/:color - Set a label
//! - DELETE /api/v1/categories/:color - Remove a label

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use crate::abnt::CategoryLabels;
use crate::citation::BucketKey;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LabelRequest {
    pub label: String,
}

/// Create the categories router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_labels))
        .route("/:color", put(set_label).delete(remove_label))
}

/// Bucket key from a path segment; must name at least one letter
fn bucket_key(color: &str) -> Result<BucketKey> {
    let color = color.trim();
    if color.is_empty() || !color.chars().all(char::is_alphabetic) {
        return Err(AppError::BadRequest(format!("Invalid color: {}", color)));
    }
    Ok(BucketKey::parse(color))
}

/// GET /api/v1/categories
async fn list_labels(State(state): State<AppState>) -> Json<CategoryLabels> {
    Json(state.session().read().await.labels().clone())
}

/// PUT /api/v1/categories/:color
async fn set_label(
    State(state): State<AppState>,
    Path(color): Path<String>,
    Json(request): Json<LabelRequest>,
) -> Result<Json<CategoryLabels>> {
    let key = bucket_key(&color)?;
    if request.label.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Type a category name before adding it".to_string(),
        ));
    }

    let mut session = state.session().write().await;
    tracing::debug!("Labelling {} as '{}'", key, request.label.trim());
    session.set_label(key, &request.label);
    Ok(Json(session.labels().clone()))
}

/// DELETE /api/v1/categories/:color
async fn remove_label(
    State(state): State<AppState>,
    Path(color): Path<String>,
) -> Result<Json<CategoryLabels>> {
    let key = bucket_key(&color)?;

    let mut session = state.session().write().await;
    session
        .remove_label(&key)
        .ok_or_else(|| AppError::NotFound(format!("No label for {}", key)))?;
    Ok(Json(session.labels().clone()))
}
