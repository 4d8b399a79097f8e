//! User profile types and request payloads.
//!
//! The `User` record is what the HTTP layer returns; password hashes live
//! only in the storage layer and never appear on these types. Request
//! payloads carry their own validation rules so handlers can check input
//! with a single `validate()` call before touching the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Integer user identifier. Path segments like `/user/42` coerce into this.
pub type UserId = i64;

/// Core user type for authentication and profile management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,
    /// Unique username (lowercase, 3-32 chars, alphanumeric plus `_` and `-`)
    pub username: String,
    /// Display name shown in UI
    pub display_name: String,
    /// Optional email address
    pub email: Option<String>,
    /// Timestamp of account creation
    pub created_at: DateTime<Utc>,
    /// Timestamp of last profile update
    pub updated_at: DateTime<Utc>,
    /// Timestamp of most recent login
    pub last_login: Option<DateTime<Utc>>,
    /// Whether the user account is active
    pub is_active: bool,
}

/// Payload for `POST /user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub email: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_username(&self.username)?;
        validate_display_name(&self.display_name)?;
        validate_password(&self.password)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Payload for `PUT /user/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub new_password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(display_name) = &self.display_name {
            validate_display_name(display_name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.new_password {
            validate_password(password)?;
        }
        Ok(())
    }
}

/// Usernames the service refuses to hand out.
const RESERVED_USERNAMES: &[&str] = &["admin", "root", "system", "api", "atrium"];

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let username = username.trim();

    if username.len() < 3 {
        return Err(ValidationError::InvalidUsername(
            "must be at least 3 characters".into(),
        ));
    }

    if username.len() > 32 {
        return Err(ValidationError::InvalidUsername(
            "cannot exceed 32 characters".into(),
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::InvalidUsername(
            "only letters, numbers, underscores, and hyphens are allowed".into(),
        ));
    }

    if RESERVED_USERNAMES.contains(&username.to_lowercase().as_str()) {
        return Err(ValidationError::InvalidUsername("this name is reserved".into()));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::InvalidPassword(
            "must be at least 8 characters".into(),
        ));
    }

    if password.len() > 128 {
        return Err(ValidationError::InvalidPassword(
            "cannot exceed 128 characters".into(),
        ));
    }

    Ok(())
}

fn validate_display_name(display_name: &str) -> Result<(), ValidationError> {
    let display_name = display_name.trim();

    if display_name.is_empty() {
        return Err(ValidationError::InvalidDisplayName("cannot be empty".into()));
    }

    if display_name.len() > 64 {
        return Err(ValidationError::InvalidDisplayName(
            "cannot exceed 64 characters".into(),
        ));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    // Deliverability is the mail server's problem; this only rejects values
    // that cannot possibly be an address.
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail("missing '@'".into()));
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidEmail("malformed address".into()));
    }

    Ok(())
}
