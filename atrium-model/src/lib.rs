//! Core data model definitions shared across Atrium crates.

pub mod auth;
pub mod error;
pub mod routes;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use auth::{AuthToken, AuthorizedUser, Claims, LoginRequest, RegisterRequest};
pub use error::ValidationError;
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserId};
