//! Handler for the authenticated "my urls" listing.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::url::{UrlListResponse, UrlResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's own records, newest first.
///
/// # Endpoint
///
/// `GET /api/url/my-urls?page=&pageSize=`
///
/// Defaults: page 1, pageSize 10. Requires authentication.
///
/// # Errors
///
/// Returns 400 for out-of-range pagination parameters.
pub async fn my_urls_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<UrlListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (items, total_count) = state.url_service.list_owned(&user_id, offset, limit).await?;

    let urls = items
        .into_iter()
        .map(|entity| {
            let short_url = state.short_url(&entity.code);
            UrlResponse::from_entity(entity, short_url)
        })
        .collect();

    Ok(Json(UrlListResponse {
        urls,
        total_count,
        page: params.page(),
        page_size: params.page_size(),
    }))
}
