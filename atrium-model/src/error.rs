use thiserror::Error;

/// Errors produced by request payload validation.
///
/// Validation is a pure check over the incoming DTO; handlers run it before
/// any service call so the service layer only ever sees well-formed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username is invalid: {0}")]
    InvalidUsername(String),
    #[error("password is invalid: {0}")]
    InvalidPassword(String),
    #[error("display name is invalid: {0}")]
    InvalidDisplayName(String),
    #[error("email is invalid: {0}")]
    InvalidEmail(String),
}
