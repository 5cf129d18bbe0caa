//! Application state shared across handlers.

use shutter_core::config::AppConfig;
use shutter_store::{BlobStore, RecordStore};
use std::sync::Arc;

/// Shared application state.
///
/// Built once at process start and threaded into every handler; there are
/// no ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Image record sidecar store.
    pub records: Arc<RecordStore>,
    /// Image blob store.
    pub blobs: Arc<BlobStore>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, records: Arc<RecordStore>, blobs: Arc<BlobStore>) -> Self {
        Self {
            config: Arc::new(config),
            records,
            blobs,
        }
    }

    /// Absolute raw-image URL for an id.
    pub fn image_url(&self, id: &shutter_core::ImageId) -> String {
        format!("{}/i/{id}", self.config.server.base_url())
    }

    /// Absolute embed-page URL for an id.
    pub fn view_url(&self, id: &shutter_core::ImageId) -> String {
        format!("{}/view/{id}", self.config.server.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shutter_core::ImageId;
    use tempfile::tempdir;

    #[tokio::test]
    async fn urls_use_public_base() {
        let temp = tempdir().unwrap();
        let mut config = AppConfig::for_testing();
        config.server.public_base_url = "https://img.example.com/".to_string();
        config.storage.path = temp.path().to_path_buf();

        let (records, blobs) = shutter_store::open(&config.storage).await.unwrap();
        let state = AppState::new(config, records, blobs);

        let id = ImageId::parse("abc").unwrap();
        assert_eq!(state.image_url(&id), "https://img.example.com/i/abc");
        assert_eq!(state.view_url(&id), "https://img.example.com/view/abc");
    }
}
