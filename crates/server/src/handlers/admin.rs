//! Deletion and health endpoints.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use shutter_core::ImageId;

/// Plain `{ok: true}` acknowledgement.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// DELETE /delete/{id} - Remove an image's blob and record.
///
/// Auth is enforced by the route middleware. Removal is blob-first and
/// idempotent at each step, so a retry after a half-finished delete
/// converges instead of erroring.
#[tracing::instrument(skip(state))]
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    let id = ImageId::parse(&id).map_err(|_| ApiError::NotFound(format!("no such image: {id}")))?;
    let record = state
        .records
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no such image: {id}")))?;

    state
        .blobs
        .remove(&record.filename)
        .await
        .map_err(|e| deletion_failed(&id, e))?;
    state
        .records
        .delete(&id)
        .await
        .map_err(|e| deletion_failed(&id, e))?;

    tracing::info!(id = %id, "Image deleted");
    Ok(Json(OkResponse { ok: true }))
}

fn deletion_failed(id: &ImageId, e: shutter_store::StoreError) -> ApiError {
    tracing::error!(id = %id, error = %e, "Deletion failed");
    ApiError::Internal("deletion failed".to_string())
}

/// GET /health - Liveness probe, intentionally unauthenticated.
pub async fn health_check() -> Json<OkResponse> {
    Json(OkResponse { ok: true })
}
