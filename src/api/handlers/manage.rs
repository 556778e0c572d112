//! Handlers for owner-only record mutations (delete, toggle).

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::url::{MessageResponse, ToggleResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Permanently deletes the caller's own record.
///
/// # Endpoint
///
/// `DELETE /api/url/{id}`
///
/// # Errors
///
/// Returns 404 when the id is unknown or the record belongs to someone
/// else; foreign ownership is not disclosed.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.url_service.delete(id, &user_id).await?;

    Ok(Json(MessageResponse {
        message: "URL deleted successfully".to_string(),
    }))
}

/// Flips the active flag on the caller's own record.
///
/// # Endpoint
///
/// `PUT /api/url/{id}/toggle`
///
/// Deactivated records answer 404 on redirect until toggled back.
///
/// # Errors
///
/// Returns 404 when the id is unknown or the record belongs to someone else.
pub async fn toggle_url_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ToggleResponse>, AppError> {
    let is_active = state.url_service.toggle(id, &user_id).await?;

    let verb = if is_active { "activated" } else { "deactivated" };

    Ok(Json(ToggleResponse {
        message: format!("URL {verb} successfully"),
        is_active,
    }))
}
