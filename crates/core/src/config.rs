//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Externally visible base URL used to build absolute image links.
    /// No trailing slash.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_max_upload_bytes() -> u64 {
    crate::DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            public_base_url: default_public_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }
}

/// Storage configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding blob files and their JSON sidecars.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/images")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Admin credential configuration.
///
/// A single shared (username, password) pair gates all mutation endpoints.
/// There is no user directory; every caller with the secret has full
/// mutation rights.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Admin username.
    #[serde(default = "default_username")]
    pub username: String,
    /// Admin password.
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "changeme".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

impl AuthConfig {
    /// Whether the password is still the shipped default.
    pub fn is_default_password(&self) -> bool {
        self.password == default_password()
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Admin credentials.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Create a test configuration with fixed credentials.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig {
                username: "admin".to_string(),
                password: "test-password".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.server.max_upload_bytes, 25 * 1024 * 1024);
        assert_eq!(config.storage.path, PathBuf::from("./data/images"));
        assert_eq!(config.auth.username, "admin");
        assert!(config.auth.is_default_password());
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let server = ServerConfig {
            public_base_url: "https://img.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(server.base_url(), "https://img.example.com");
    }

    #[test]
    fn custom_password_is_not_default() {
        let auth = AuthConfig {
            username: "ops".to_string(),
            password: "s3cret".to_string(),
        };
        assert!(!auth.is_default_password());
    }
}
