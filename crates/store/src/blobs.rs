//! Raw image blob storage on the local filesystem.

use crate::error::{StoreError, StoreResult};
use bytes::Bytes;
use futures::Stream;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use uuid::Uuid;

/// Chunk size for streaming reads (64 KiB).
const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// A boxed stream of bytes for streaming blob reads.
pub type ByteStream = Pin<Box<dyn Stream<Item = StoreResult<Bytes>> + Send>>;

/// Metadata about a stored blob.
#[derive(Clone, Debug)]
pub struct BlobMeta {
    /// Blob size in bytes.
    pub size: u64,
}

/// Blob store rooted at the image storage directory.
///
/// Blobs are named `<id><ext>` and written with a temp-file-plus-rename
/// sequence so a partially written file is never visible under its final
/// name.
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a new blob store, creating the root directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Resolve a blob filename to its path.
    ///
    /// Filenames come from validated records (`<id><ext>`), but traversal
    /// is still rejected here so the store never trusts its callers.
    fn blob_path(&self, filename: &str) -> StoreResult<PathBuf> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(filename)),
            _ => Err(StoreError::InvalidKey(format!(
                "blob filename must be a single path component: {filename}"
            ))),
        }
    }

    /// Write a blob atomically.
    ///
    /// Data lands in a `.tmp.<uuid>` sibling first, is fsynced, then renamed
    /// over the final path. A crash mid-write leaves only a temp file.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn put(&self, filename: &str, data: Bytes) -> StoreResult<()> {
        let path = self.blob_path(filename)?;
        let temp_path = path.with_file_name(format!("{filename}.tmp.{}", Uuid::new_v4()));
        {
            let mut file = fs::File::create(&temp_path).await?;
            if let Err(e) = file.write_all(&data).await {
                drop(file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(e.into());
            }
            file.sync_all().await?;
        }
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Whether a blob exists.
    pub async fn exists(&self, filename: &str) -> StoreResult<bool> {
        let path = self.blob_path(filename)?;
        fs::try_exists(&path).await.map_err(StoreError::Io)
    }

    /// Get a blob's size without reading its content.
    #[instrument(skip(self))]
    pub async fn head(&self, filename: &str) -> StoreResult<BlobMeta> {
        let path = self.blob_path(filename)?;
        let metadata = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(filename.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;
        Ok(BlobMeta {
            size: metadata.len(),
        })
    }

    /// Read a whole blob into memory.
    #[instrument(skip(self))]
    pub async fn get(&self, filename: &str) -> StoreResult<Bytes> {
        let path = self.blob_path(filename)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(filename.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    /// Open a blob as a chunked byte stream.
    #[instrument(skip(self))]
    pub async fn get_stream(&self, filename: &str) -> StoreResult<ByteStream> {
        use tokio::io::AsyncReadExt;

        let path = self.blob_path(filename)?;
        let file = fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(filename.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;

        let stream = async_stream::try_stream! {
            let mut file = file;
            let mut buf = vec![0u8; STREAM_CHUNK_SIZE];
            loop {
                let n = file.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                yield Bytes::copy_from_slice(&buf[..n]);
            }
        };

        Ok(Box::pin(stream))
    }

    /// Remove a blob. Absence is not an error; deletion must stay
    /// idempotent so a half-finished delete can be retried.
    #[instrument(skip(self))]
    pub async fn remove(&self, filename: &str) -> StoreResult<()> {
        let path = self.blob_path(filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Verify the storage root exists and is a directory.
    pub async fn health_check(&self) -> StoreResult<()> {
        let metadata = fs::metadata(&self.root).await.map_err(|e| {
            StoreError::Io(std::io::Error::new(
                e.kind(),
                format!("storage root not accessible: {e}"),
            ))
        })?;
        if !metadata.is_dir() {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("storage root is not a directory: {:?}", self.root),
            )));
        }
        Ok(())
    }
}
