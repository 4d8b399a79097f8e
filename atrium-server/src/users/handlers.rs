//! User route handlers.
//!
//! Every route here sits behind the auth middleware; the handlers extract
//! the request parts, coerce the path id, and delegate to [`UserService`].
//! Failures propagate as `AppError` untouched.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use atrium_model::{AuthorizedUser, CreateUserRequest, UpdateUserRequest, User, UserId};

use crate::{
    infra::{app_state::AppState, errors::AppResult},
    users::UserService,
};

/// `POST /user` — create a user from the validated payload.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<Json<User>> {
    request.validate()?;

    let user = UserService::new(&state).create_user(request).await?;
    Ok(Json(user))
}

/// `GET /user` — list all users.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserService::new(&state).list_users().await?;
    Ok(Json(users))
}

/// `GET /user/details` — the authenticated user's own record.
///
/// The id comes exclusively from the identity the auth middleware attached;
/// neither the path nor the body is consulted.
pub async fn current_user_details(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthorizedUser>,
) -> AppResult<Json<User>> {
    let user = UserService::new(&state).find_user(identity.id).await?;
    Ok(Json(user))
}

/// `PUT /user/{id}` — update the addressed user.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    request.validate()?;

    let user = UserService::new(&state).update_user(user_id, request).await?;
    Ok(Json(user))
}

/// `DELETE /user/{id}` — delete the addressed user.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<StatusCode> {
    UserService::new(&state).delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
