//! HTTP Basic authentication middleware.
//!
//! A single shared (username, password) pair gates the mutation endpoints.
//! Failures carry the `WWW-Authenticate` challenge so browser-driven
//! callers (the gallery's delete affordance) get a credential prompt.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha2::{Digest, Sha256};

/// Extract the Basic credentials from the Authorization header.
/// Per RFC 7617 the scheme name is case-insensitive.
fn extract_basic_credentials(req: &Request) -> Option<(String, String)> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    if value.len() < 6 || !value[..6].eq_ignore_ascii_case("basic ") {
        return None;
    }
    let decoded = BASE64.decode(value[6..].trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// SHA-256 digest of a credential string.
///
/// Credentials are compared as digests rather than raw strings so the
/// comparison does not short-circuit on the first differing byte.
fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.finalize().into()
}

/// Check supplied credentials against the configured pair.
pub fn verify_credentials(state: &AppState, username: &str, password: &str) -> ApiResult<()> {
    let auth = &state.config.auth;
    let username_ok = digest(username) == digest(&auth.username);
    let password_ok = digest(password) == digest(&auth.password);
    if username_ok && password_ok {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid credentials".to_string()))
    }
}

/// Middleware requiring Basic auth on the wrapped routes.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some((username, password)) = extract_basic_credentials(&req) else {
        return Err(ApiError::Unauthorized("authentication required".to_string()));
    };

    if let Err(e) = verify_credentials(&state, &username, &password) {
        tracing::warn!(username = %username, "Rejected credentials");
        return Err(e);
    }

    Ok(next.run(req).await)
}
