//! HTTP API server for the Shutter image host.
//!
//! This crate provides the HTTP surface:
//! - Multipart image upload
//! - Raw image retrieval by id
//! - HTML embed and gallery pages
//! - Authenticated deletion
//! - Health check

pub mod auth;
pub mod error;
pub mod handlers;
pub mod html;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
