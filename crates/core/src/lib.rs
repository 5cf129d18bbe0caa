//! Core domain types and shared logic for the Shutter image host.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Image identifiers and their validation rules
//! - The image record persisted next to each blob
//! - Media type admission and extension handling
//! - Application configuration

pub mod config;
pub mod error;
pub mod image_id;
pub mod media;
pub mod record;

pub use config::{AppConfig, AuthConfig, ServerConfig, StorageConfig};
pub use error::{Error, Result};
pub use image_id::ImageId;
pub use media::MediaType;
pub use record::ImageRecord;

/// Maximum length of a caller-supplied image id.
pub const MAX_IMAGE_ID_LEN: usize = 64;

/// Default upload size ceiling: 25 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;
