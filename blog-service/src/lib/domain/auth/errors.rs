use thiserror::Error;

use crate::user::errors::UserError;

/// Reasons an `Authorization` header is refused before any token check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerTokenError {
    #[error("Authorization header must use the Bearer scheme")]
    MissingScheme,

    #[error("Bearer token is empty")]
    EmptyToken,

    #[error("Bearer token contains whitespace")]
    UnexpectedWhitespace,
}

/// Outcomes of the session protocol.
///
/// Token verification failures are all reported as `Unauthorized`; the
/// specific cause is logged, never returned.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Missing or malformed JWT: {0}")]
    Malformed(#[from] BearerTokenError),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired JWT")]
    Unauthorized,

    #[error("Email already exists: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::Conflict(email),
            UserError::NotFound(id) => AuthError::NotFound(id),
            UserError::NotFoundByEmail(email) => AuthError::NotFound(email),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
