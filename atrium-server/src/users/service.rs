//! Centralized user management service.
//!
//! Single place for all user operations so the HTTP handlers stay thin:
//! they validate, call one method here, and return the result.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use tracing::info;

use atrium_model::{CreateUserRequest, UpdateUserRequest, User, UserId};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};
use crate::store::NewUser;

pub struct UserService<'a> {
    state: &'a AppState,
}

impl<'a> UserService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Hash a password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AppError::internal("Failed to hash password"))?
            .to_string();

        Ok(hash)
    }

    /// Verify a password against a stored hash
    pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|_| AppError::internal("Invalid password hash"))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Create a new user
    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<User> {
        let password_hash = Self::hash_password(&request.password)?;

        let user = self
            .state
            .users
            .create(NewUser {
                username: request.username.trim().to_lowercase(),
                display_name: request.display_name,
                email: request.email,
                password_hash,
            })
            .await?;

        info!(
            target: "user.admin",
            user_id = user.id,
            username = %user.username,
            action = "create"
        );

        Ok(user)
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.state.users.find_all().await?)
    }

    /// Look up a single user by id
    pub async fn find_user(&self, user_id: UserId) -> AppResult<User> {
        self.state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user {user_id} not found")))
    }

    /// Update a user
    pub async fn update_user(&self, user_id: UserId, request: UpdateUserRequest) -> AppResult<User> {
        let mut user = self.find_user(user_id).await?;

        if let Some(display_name) = request.display_name {
            user.display_name = display_name;
        }
        if let Some(email) = request.email {
            user.email = Some(email);
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now();

        if let Some(password) = request.new_password {
            let password_hash = Self::hash_password(&password)?;
            self.state.users.update_password(user_id, &password_hash).await?;
        }

        self.state.users.update(&user).await?;

        info!(
            target: "user.admin",
            user_id = user.id,
            username = %user.username,
            action = "update"
        );

        Ok(user)
    }

    /// Delete a user
    pub async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        self.state.users.remove(user_id).await?;

        info!(target: "user.admin", user_id, action = "delete");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = UserService::hash_password("a-long-password").unwrap();
        assert!(UserService::verify_password("a-long-password", &hash).unwrap());
        assert!(!UserService::verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = UserService::hash_password("a-long-password").unwrap();
        let second = UserService::hash_password("a-long-password").unwrap();
        assert_ne!(first, second);
    }
}
