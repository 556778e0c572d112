//! Handler for the URL shortening endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::ShortenRequest;
use crate::api::dto::url::UrlResponse;
use crate::api::middleware::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/url/shorten`
///
/// Authentication is optional: a valid Bearer token attaches the caller as
/// the record's owner, otherwise the record is anonymous.
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "example.com/some/page",
///   "customCode": "promo",                  // optional, 3-10 alphanumeric
///   "expiresAt": "2026-12-31T23:59:59Z"     // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 for a malformed URL, an out-of-range custom code, or a
/// custom code that is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(Caller(owner)): Extension<Caller>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let created = state
        .url_service
        .create_short_url(
            &payload.original_url,
            payload.custom_code,
            payload.expires_at,
            owner,
        )
        .await?;

    let short_url = state.short_url(&created.code);

    Ok((
        StatusCode::CREATED,
        Json(UrlResponse::from_entity(created, short_url)),
    ))
}
