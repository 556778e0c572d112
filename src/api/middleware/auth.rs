//! Bearer token authentication middleware.
//!
//! Two flavors: [`required`] rejects unauthenticated requests with 401,
//! [`optional`] resolves the caller when a valid token is present and
//! degrades to anonymous otherwise (creation and stats endpoints accept
//! anonymous callers).

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::Owner;
use crate::{error::AppError, state::AppState};

/// Authenticated caller id, inserted by [`required`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Caller identity for optionally-authenticated routes, inserted by
/// [`optional`].
#[derive(Debug, Clone)]
pub struct Caller(pub Owner);

/// Rejects the request with 401 unless a valid Bearer token is presented.
///
/// On success the resolved [`CurrentUser`] is attached to the request
/// extensions for handlers to consume.
pub async fn required(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user_id = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(user_id));

    Ok(next.run(req).await)
}

/// Resolves the caller when a valid Bearer token is presented; otherwise
/// the request proceeds as anonymous. A token that fails authentication is
/// treated the same as no token, so open endpoints never reject on bad
/// credentials.
pub async fn optional(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let owner = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => match st.auth_service.authenticate(&token).await {
            Ok(user_id) => Owner::User(user_id),
            Err(_) => Owner::Anonymous,
        },
        Err(_) => Owner::Anonymous,
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(Caller(owner));

    Ok(next.run(req).await)
}
