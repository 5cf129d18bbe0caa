//! The image record persisted next to each blob.

use crate::image_id::ImageId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Metadata for one stored image.
///
/// Persisted as `<id>.json` in the storage directory, next to the blob file
/// the `filename` field points at. Records are immutable after creation;
/// the only lifecycle transition is full deletion.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Unique identifier.
    pub id: ImageId,
    /// On-disk blob filename: `<id><ext>`.
    pub filename: String,
    /// Client-supplied name, untrusted; escape wherever rendered.
    pub original_name: String,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
}

impl ImageRecord {
    /// Create a new record stamped with the current time.
    ///
    /// `extension` must include its leading dot (see
    /// [`crate::media::normalized_extension`]).
    pub fn new(id: ImageId, extension: &str, original_name: String) -> Self {
        let filename = format!("{id}{extension}");
        Self {
            id,
            filename,
            original_name,
            uploaded_at: OffsetDateTime::now_utc(),
        }
    }

    /// The sidecar filename this record is stored under.
    pub fn record_filename(&self) -> String {
        record_filename(&self.id)
    }
}

/// Sidecar filename for an id.
pub fn record_filename(id: &ImageId) -> String {
    format!("{id}.json")
}
