//! Handler for per-record statistics.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::url::UrlResponse;
use crate::api::middleware::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a record's metadata including click count and last access.
///
/// # Endpoint
///
/// `GET /api/url/stats/{code}`
///
/// Records created anonymously are viewable by anyone; records with an
/// owner are viewable by that owner only.
///
/// # Errors
///
/// - 404 when the code is unknown
/// - 403 when the record belongs to someone else
pub async fn stats_handler(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(code): Path<String>,
) -> Result<Json<UrlResponse>, AppError> {
    let record = state.url_service.stats(&code, &caller).await?;

    let short_url = state.short_url(&record.code);

    Ok(Json(UrlResponse::from_entity(record, short_url)))
}
