use auth::TokenPair;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::auth::errors::BearerTokenError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Claims carried by an access token.
///
/// Unknown fields are refused so that a token minted with a different claim
/// set is never accepted in place of this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessClaims {
    pub user_id: UserId,
    pub email: String,
}

impl AccessClaims {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.as_str().to_string(),
        }
    }
}

/// Claims carried by a refresh token. No email, only the subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    pub user_id: UserId,
}

impl RefreshClaims {
    pub fn for_user(user: &User) -> Self {
        Self { user_id: user.id }
    }
}

/// Tokens handed out on a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for SessionTokens {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Token extracted from an `Authorization` header value.
///
/// The header must be exactly `Bearer <token>`: a single space after the
/// scheme and a non-empty token without whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerToken<'a>(&'a str);

impl<'a> BearerToken<'a> {
    const SCHEME: &'static str = "Bearer ";

    /// Parse an `Authorization` header value.
    ///
    /// # Errors
    /// * `MissingScheme` - Value does not start with `Bearer `
    /// * `EmptyToken` - Nothing follows the scheme
    /// * `UnexpectedWhitespace` - Token contains whitespace
    pub fn parse(header: &'a str) -> Result<Self, BearerTokenError> {
        let token = header
            .strip_prefix(Self::SCHEME)
            .ok_or(BearerTokenError::MissingScheme)?;

        if token.is_empty() {
            return Err(BearerTokenError::EmptyToken);
        }

        if token.chars().any(char::is_whitespace) {
            return Err(BearerTokenError::UnexpectedWhitespace);
        }

        Ok(Self(token))
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }
}
