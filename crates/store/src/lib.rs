//! On-disk storage for the Shutter image host.
//!
//! This crate persists both halves of an image: the raw blob
//! (`<id><ext>`) and its JSON sidecar record (`<id>.json`), side by side
//! in one configured directory:
//! - [`BlobStore`] writes blobs atomically (temp file + rename)
//! - [`RecordStore`] claims ids with exclusive sidecar creation

pub mod blobs;
pub mod error;
pub mod records;

pub use blobs::{BlobMeta, BlobStore, ByteStream};
pub use error::{StoreError, StoreResult};
pub use records::RecordStore;

use shutter_core::config::StorageConfig;
use std::sync::Arc;

/// Open both stores over the configured storage directory.
pub async fn open(config: &StorageConfig) -> StoreResult<(Arc<RecordStore>, Arc<BlobStore>)> {
    let records = RecordStore::new(&config.path).await?;
    let blobs = BlobStore::new(&config.path).await?;
    Ok((Arc::new(records), Arc::new(blobs)))
}
