//! API error types.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Challenge issued with every authentication failure.
pub const WWW_AUTHENTICATE_CHALLENGE: &str = "Basic realm=\"Uploader\"";

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    /// Metadata exists but the blob file is gone. Kept distinct from
    /// [`ApiError::NotFound`] so partial-delete states are diagnosable.
    #[error("file missing: {0}")]
    FileMissing(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("payload too large: upload exceeds {max_bytes} bytes")]
    PayloadTooLarge { max_bytes: u64 },

    #[error("internal error: {0}")]
    Internal(String),

    #[error("store error: {0}")]
    Store(#[from] shutter_store::StoreError),

    #[error("core error: {0}")]
    Core(#[from] shutter_core::Error),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::FileMissing(_) => "file_missing",
            Self::BadRequest(_) => "bad_request",
            Self::Unauthorized(_) => "unauthorized",
            Self::Conflict(_) => "conflict",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::Internal(_) => "internal_error",
            Self::Store(e) => match e {
                shutter_store::StoreError::NotFound(_) => "not_found",
                shutter_store::StoreError::AlreadyExists(_) => "conflict",
                _ => "store_error",
            },
            Self::Core(_) => "bad_request",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::FileMissing(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) => match e {
                shutter_store::StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                shutter_store::StoreError::AlreadyExists(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Core(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Keep filesystem details out of client responses.
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                "internal error".to_string()
            }
            Self::Store(e)
                if !matches!(
                    e,
                    shutter_store::StoreError::NotFound(_)
                        | shutter_store::StoreError::AlreadyExists(_)
                ) =>
            {
                tracing::error!(error = %e, "Store error");
                "internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            code: self.code().to_string(),
            message,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static(WWW_AUTHENTICATE_CHALLENGE),
            );
        }
        response
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
