use std::fmt;

use thiserror::Error;

/// Reason a token was refused during verification.
///
/// Only meant for diagnostics. Anything facing a client must report every
/// variant identically, see [`JwtError::Rejected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Not a decodable token, or its payload does not fit the expected claims.
    Malformed,

    /// Signature does not match the signing secret.
    InvalidSignature,

    /// `exp` is not in the future.
    Expired,
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenRejection::Malformed => f.write_str("malformed"),
            TokenRejection::InvalidSignature => f.write_str("invalid signature"),
            TokenRejection::Expired => f.write_str("expired"),
        }
    }
}

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    // The message deliberately ignores the cause.
    #[error("Invalid or expired token")]
    Rejected(TokenRejection),
}

impl JwtError {
    /// Cause of a verification failure, if this is one.
    pub fn rejection(&self) -> Option<TokenRejection> {
        match self {
            JwtError::Rejected(rejection) => Some(*rejection),
            _ => None,
        }
    }
}
