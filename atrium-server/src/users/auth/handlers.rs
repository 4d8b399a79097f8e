//! Public authentication endpoints: register and login.

use axum::{Json, extract::State};

use atrium_model::{AuthToken, CreateUserRequest, LoginRequest, RegisterRequest};

use super::jwt::{ACCESS_TOKEN_TTL_SECS, generate_access_token};
use crate::{
    infra::{
        app_state::AppState,
        errors::{AppError, AppResult},
    },
    users::UserService,
};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<AuthToken>> {
    request.validate()?;

    let service = UserService::new(&state);
    let user = service
        .create_user(CreateUserRequest {
            username: request.username,
            display_name: request.display_name,
            password: request.password,
            email: None,
        })
        .await?;

    issue_token(&state, user.id)
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<AuthToken>> {
    let user = state
        .users
        .find_by_username(&request.username.trim().to_lowercase())
        .await?
        .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

    let password_hash = state
        .users
        .password_hash(user.id)
        .await?
        .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

    if !UserService::verify_password(&request.password, &password_hash)? {
        return Err(AppError::unauthorized("invalid credentials"));
    }

    if !user.is_active {
        return Err(AppError::forbidden("account is disabled"));
    }

    state.users.mark_login(user.id).await?;

    issue_token(&state, user.id)
}

fn issue_token(state: &AppState, user_id: atrium_model::UserId) -> AppResult<Json<AuthToken>> {
    let access_token = generate_access_token(user_id, state.token_key())
        .map_err(|_| AppError::internal("Failed to generate access token"))?;

    Ok(Json(AuthToken {
        user_id,
        access_token,
        expires_in: ACCESS_TOKEN_TTL_SECS,
    }))
}
