//! Image upload handler.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Multipart, Query, State};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use shutter_core::media::{MediaType, normalized_extension};
use shutter_core::{ImageId, ImageRecord};

/// Query parameters for the upload endpoint.
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Optional caller-supplied id (alternative to the `id` body field).
    pub id: Option<String>,
}

/// Response for a successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Assigned image id.
    pub id: ImageId,
    /// Absolute raw-image URL.
    pub url: String,
    /// Absolute embed-page URL.
    pub view_url: String,
}

/// The `file` part of the multipart form, fully buffered.
struct FilePart {
    original_name: String,
    media_type: MediaType,
    data: Bytes,
}

/// POST /upload - Store a new image.
#[tracing::instrument(skip(state, query, multipart), fields(id))]
pub async fn upload_image(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let max_bytes = state.config.server.max_upload_bytes;
    let mut file: Option<FilePart> = None;
    let mut body_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                // Admission happens before the body is read, so a rejected
                // type never touches memory or disk.
                let declared = field
                    .content_type()
                    .ok_or_else(|| {
                        ApiError::BadRequest("file part has no content type".to_string())
                    })?
                    .to_string();
                let media_type = MediaType::from_mime(&declared)
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

                let data = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("failed to read file part: {e}"))
                })?;
                if data.len() as u64 > max_bytes {
                    return Err(ApiError::PayloadTooLarge {
                        max_bytes,
                    });
                }

                file = Some(FilePart {
                    original_name,
                    media_type,
                    data,
                });
            }
            "id" => {
                let text = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("failed to read id field: {e}"))
                })?;
                if !text.is_empty() {
                    body_id = Some(text);
                }
            }
            _ => {
                // Ignore unknown fields.
            }
        }
    }

    let file = file.ok_or_else(|| ApiError::BadRequest("no file field in request".to_string()))?;

    // Body field wins over the query parameter when both are present.
    let id = match body_id.or(query.id) {
        Some(custom) => ImageId::parse(&custom)?,
        None => ImageId::generate(),
    };
    tracing::Span::current().record("id", id.as_str());

    let extension = normalized_extension(&file.original_name, file.media_type);
    let record = ImageRecord::new(id.clone(), &extension, file.original_name);

    // Creating the sidecar claims the id atomically; a concurrent upload
    // racing for the same id loses here with a conflict.
    match state.records.create(&record).await {
        Ok(()) => {}
        Err(shutter_store::StoreError::AlreadyExists(_)) => {
            return Err(ApiError::Conflict(format!("image id already exists: {id}")));
        }
        Err(e) => return Err(e.into()),
    }

    // Blob lands via temp-file + rename. If it fails, release the claim so
    // the id does not stay behind as a metadata-only orphan.
    if let Err(e) = state.blobs.put(&record.filename, file.data).await {
        if let Err(cleanup) = state.records.delete(&id).await {
            tracing::error!(id = %id, error = %cleanup, "Failed to release id after blob write failure");
        }
        return Err(e.into());
    }

    tracing::info!(id = %id, filename = %record.filename, "Image stored");

    Ok(Json(UploadResponse {
        url: state.image_url(&id),
        view_url: state.view_url(&id),
        id,
    }))
}
