//! Bearer-token auth guard.
//!
//! Runs in front of every protected route: a request without a valid token
//! is rejected with 401 before any handler executes. On success the resolved
//! [`AuthorizedUser`] identity is attached to the request extensions for
//! handlers to consume.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};

use atrium_model::AuthorizedUser;

use super::jwt::validate_token;
use crate::infra::app_state::AppState;

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer_token(&request)?;
    let identity = validate_and_get_identity(&state, &token).await?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> Result<String, StatusCode> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(auth_header[7..].to_string())
}

async fn validate_and_get_identity(
    state: &AppState,
    token: &str,
) -> Result<AuthorizedUser, StatusCode> {
    let claims =
        validate_token(token, state.token_key()).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = state
        .users
        .find_by_id(claims.sub)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !user.is_active {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(AuthorizedUser {
        id: user.id,
        username: user.username,
    })
}
