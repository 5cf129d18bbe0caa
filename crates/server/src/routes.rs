//! Route configuration.

use crate::auth::require_auth;
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

/// Multipart framing overhead allowed on top of the configured upload
/// ceiling before the transport-level body limit kicks in.
const BODY_LIMIT_OVERHEAD: usize = 64 * 1024;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.server.max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(BODY_LIMIT_OVERHEAD);

    // Mutation endpoints sit behind the Basic auth gate.
    let protected_routes = Router::new()
        .route(
            "/upload",
            post(handlers::upload_image).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/delete/{id}", delete(handlers::delete_image))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public_routes = Router::new()
        .route("/i/{id}", get(handlers::get_image))
        .route("/view/{id}", get(handlers::view_image))
        .route("/gallery", get(handlers::gallery))
        // Health check is intentionally unauthenticated for probes.
        .route("/health", get(handlers::health_check));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
