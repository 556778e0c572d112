//! Handler for the public short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// A successful resolution counts exactly one click and stamps the
/// last-accessed time before the 302 is returned.
///
/// # Errors
///
/// - 404 when the code is unknown or the record is inactive
/// - 400 (`expired`) when the record is past its expiry
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.redirect_service.resolve(&code).await?;

    debug!(code, original_url, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]).into_response())
}
