//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{code}`   - Short link redirect (public)
//! - `GET /health`   - Liveness probe (public)
//! - `/api/url/*`    - Short URL REST API (Bearer token required for owner
//!   operations, optional elsewhere)
//! - `/api/users/*`  - Registration and login (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token, required or optional per route group
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router without the outer path-normalization
/// layer. Used directly by integration tests, which need a plain [`Router`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api/url", api::routes::url_routes(state.clone()))
        .nest("/api/users", api::routes::user_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
