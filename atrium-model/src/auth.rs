//! Authentication types: token claims, login/register payloads, and the
//! identity the auth guard attaches to authenticated requests.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::user::{UserId, validate_password, validate_username};

/// Identity attached to the request by the auth middleware after a
/// successful bearer-token check. Handlers consume this; nothing below the
/// middleware ever constructs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizedUser {
    pub id: UserId,
    pub username: String,
}

/// JWT claims carried by access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued to
    pub sub: UserId,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Token identifier
    pub jti: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub display_name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_username(&self.username)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

/// Successful login/register response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub user_id: UserId,
    pub access_token: String,
    /// Access-token lifetime in seconds
    pub expires_in: i64,
}
