//! JSON sidecar record storage.

use crate::error::{StoreError, StoreResult};
use shutter_core::record::record_filename;
use shutter_core::{ImageId, ImageRecord};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

/// Record store rooted at the image storage directory.
///
/// One `<id>.json` file per record, living next to its blob.
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Create a new record store, creating the root directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn record_path(&self, id: &ImageId) -> PathBuf {
        // Ids are charset-validated, so the join cannot escape the root.
        self.root.join(record_filename(id))
    }

    /// Create a record, claiming its id.
    ///
    /// The sidecar is opened with `create_new`, so "check the id is free and
    /// claim it" is one atomic filesystem operation: of two concurrent
    /// uploads racing for the same id, exactly one wins.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn create(&self, record: &ImageRecord) -> StoreResult<()> {
        let path = self.record_path(&record.id);
        let json = serde_json::to_vec_pretty(record)?;

        let open = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        let mut file = match open {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(record.id.to_string()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        if let Err(e) = file.write_all(&json).await {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(e.into());
        }
        file.sync_all().await?;
        Ok(())
    }

    /// Look up a record by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &ImageId) -> StoreResult<Option<ImageRecord>> {
        let path = self.record_path(id);
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    /// Delete a record. Absence is not an error; deletion must stay
    /// idempotent so a half-finished delete can be retried.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ImageId) -> StoreResult<()> {
        let path = self.record_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// List every record in the store.
    ///
    /// Rereads and reparses each sidecar; fine at the corpus sizes this
    /// service targets. Sidecars that fail to parse are skipped with a
    /// warning rather than failing the whole listing.
    #[instrument(skip(self))]
    pub async fn list(&self) -> StoreResult<Vec<ImageRecord>> {
        let mut records = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let data = match fs::read(&path).await {
                Ok(data) => data,
                // Deleted between read_dir and read; skip.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::Io(e)),
            };
            match serde_json::from_slice::<ImageRecord>(&data) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unparseable record");
                }
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> ImageRecord {
        ImageRecord::new(
            ImageId::parse(id).unwrap(),
            ".png",
            format!("{id}.png"),
        )
    }

    #[tokio::test]
    async fn create_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path()).await.unwrap();

        let record = sample("abc-123");
        store.create(&record).await.unwrap();

        let loaded = store.get(&record.id).await.unwrap().unwrap();
        assert_eq!(loaded.filename, "abc-123.png");
        assert_eq!(loaded.original_name, "abc-123.png");
    }

    #[tokio::test]
    async fn create_claims_id_exclusively() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path()).await.unwrap();

        let record = sample("taken");
        store.create(&record).await.unwrap();

        match store.create(&sample("taken")).await {
            Err(StoreError::AlreadyExists(id)) => assert_eq!(id, "taken"),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }

        // The original record survives the losing attempt.
        assert!(store.get(&record.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path()).await.unwrap();
        let id = ImageId::parse("ghost").unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path()).await.unwrap();

        let record = sample("gone");
        store.create(&record).await.unwrap();
        store.delete(&record.id).await.unwrap();
        store.delete(&record.id).await.unwrap();
        assert!(store.get(&record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_skips_non_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path()).await.unwrap();

        store.create(&sample("one")).await.unwrap();
        store.create(&sample("two")).await.unwrap();
        // A blob and a corrupt sidecar must not break the listing.
        std::fs::write(dir.path().join("one.png"), b"blob").unwrap();
        std::fs::write(dir.path().join("broken.json"), b"{not json").unwrap();

        let mut ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["one".to_string(), "two".to_string()]);
    }
}
