//! Raw image retrieval and the embed page.

use crate::error::{ApiError, ApiResult};
use crate::html;
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use shutter_core::media::content_type_for;
use shutter_core::{ImageId, ImageRecord};

/// Cache directive for raw image responses. Records are immutable, so the
/// bytes behind an id can be cached forever.
const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Look up a record or fail with `not_found`.
async fn require_record(state: &AppState, id: &str) -> ApiResult<ImageRecord> {
    let id = ImageId::parse(id).map_err(|_| ApiError::NotFound(format!("no such image: {id}")))?;
    state
        .records
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no such image: {id}")))
}

/// GET /i/{id} - Stream the raw image bytes.
#[tracing::instrument(skip(state))]
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let record = require_record(&state, &id).await?;

    // A sidecar without its blob is a partial-delete state; report it
    // distinctly from an unknown id.
    let meta = match state.blobs.head(&record.filename).await {
        Ok(meta) => meta,
        Err(shutter_store::StoreError::NotFound(_)) => {
            tracing::warn!(id = %record.id, filename = %record.filename, "Record has no blob");
            return Err(ApiError::FileMissing(format!(
                "stored file is missing for image: {}",
                record.id
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let stream = match state.blobs.get_stream(&record.filename).await {
        Ok(stream) => stream,
        Err(shutter_store::StoreError::NotFound(_)) => {
            return Err(ApiError::FileMissing(format!(
                "stored file is missing for image: {}",
                record.id
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let headers = [
        (header::CONTENT_TYPE, content_type_for(&record.filename)),
        (header::CONTENT_LENGTH, meta.size.to_string()),
        (
            header::CACHE_CONTROL,
            IMMUTABLE_CACHE_CONTROL.to_string(),
        ),
    ];

    Ok((headers, Body::from_stream(stream)).into_response())
}

/// GET /view/{id} - HTML embed page for one image.
#[tracing::instrument(skip(state))]
pub async fn view_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let record = require_record(&state, &id).await?;
    let image_url = state.image_url(&record.id);
    Ok(Html(html::embed_page(&record, &image_url)))
}
