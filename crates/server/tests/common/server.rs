//! Server test utilities.

use shutter_core::config::AppConfig;
use shutter_server::{AppState, create_router};
use std::path::PathBuf;
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server over a temporary storage directory.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

        let mut config = AppConfig::for_testing();
        config.storage.path = temp_dir.path().join("images");
        modifier(&mut config);

        let (records, blobs) = shutter_store::open(&config.storage)
            .await
            .expect("Failed to open image store");

        let state = AppState::new(config, records, blobs);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// The directory blobs and sidecars are stored in.
    pub fn storage_dir(&self) -> PathBuf {
        self.state.config.storage.path.clone()
    }

    /// Names of all files currently in the storage directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.storage_dir())
            .expect("storage directory should exist")
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
