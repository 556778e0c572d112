//! Handlers for user registration and login.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user and returns their first bearer token.
///
/// # Endpoint
///
/// `POST /api/users/auth/register`
///
/// # Errors
///
/// Returns 400 for an invalid email, a password under 8 characters, or an
/// email that is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let display_name = payload
        .display_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| {
            payload
                .email
                .split('@')
                .next()
                .unwrap_or(&payload.email)
                .to_string()
        });

    let (user, token) = state
        .auth_service
        .register(&payload.email, &display_name, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
        }),
    ))
}

/// Authenticates credentials and returns a fresh bearer token.
///
/// # Endpoint
///
/// `POST /api/users/auth/login`
///
/// # Errors
///
/// Returns 401 for an unknown email or wrong password, without revealing
/// which.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (user, token) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        email: user.email,
        display_name: user.display_name,
    }))
}
