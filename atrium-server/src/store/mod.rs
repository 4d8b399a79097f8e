//! Storage port for user records.
//!
//! The HTTP layer only ever talks to [`UserStore`]; whether rows live in
//! Postgres or in process memory is decided once at startup. Password hashes
//! stay behind this boundary and are never attached to `User` values.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use atrium_model::{User, UserId};

pub use memory::MemoryUserStore;
pub use postgres::PostgresUserStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn user_not_found(id: UserId) -> Self {
        Self::NotFound(format!("user {id} not found"))
    }
}

/// Parameters for inserting a new user. The hash is produced by the user
/// service; the store never sees a plaintext password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return the stored record with its assigned id.
    /// Fails with `Conflict` when the username is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Fetch the stored password hash for login verification.
    async fn password_hash(&self, id: UserId) -> Result<Option<String>, StoreError>;

    /// Persist the mutable profile fields of `user`. Fails with `NotFound`
    /// when the id does not exist.
    async fn update(&self, user: &User) -> Result<(), StoreError>;

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<(), StoreError>;

    /// Delete the user. Fails with `NotFound` when the id does not exist.
    async fn remove(&self, id: UserId) -> Result<(), StoreError>;

    /// Stamp `last_login` for the user.
    async fn mark_login(&self, id: UserId) -> Result<(), StoreError>;
}
