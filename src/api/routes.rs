//! API route configuration.

use crate::api::handlers::{
    delete_url_handler, login_handler, my_urls_handler, register_handler, shorten_handler,
    stats_handler, toggle_url_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

/// URL endpoints (`/api/url/*`).
///
/// # Endpoints
///
/// - `POST   /shorten`        - Create a short URL (auth optional)
/// - `GET    /stats/{code}`   - Record metadata (auth optional, owner-gated)
/// - `GET    /my-urls`        - Paginated list of own records (auth required)
/// - `DELETE /{id}`           - Delete own record (auth required)
/// - `PUT    /{id}/toggle`    - Flip active flag (auth required)
pub fn url_routes(state: AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional,
        ));

    let owner_only = Router::new()
        .route("/my-urls", get(my_urls_handler))
        .route("/{id}", delete(delete_url_handler))
        .route("/{id}/toggle", put(toggle_url_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::required));

    open.merge(owner_only)
}

/// User endpoints (`/api/users/*`).
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account, returns a bearer token
/// - `POST /auth/login`    - Authenticate, returns a bearer token
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}
