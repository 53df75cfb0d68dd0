use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::jwt::Verified;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Validity windows of the two session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for SessionLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::hours(24),
            refresh: Duration::days(30),
        }
    }
}

/// Authentication coordinator combining password verification and token issuance.
///
/// Issues a short-lived access token and a longer-lived refresh token, both
/// signed with the same secret.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    lifetimes: SessionLifetimes,
}

/// Access and refresh token minted together on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost and lifetimes.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has zero length
    pub fn new(jwt_secret: &[u8]) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(jwt_secret)?,
            lifetimes: SessionLifetimes::default(),
        })
    }

    /// Replace the password hasher.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Replace the token lifetimes.
    pub fn with_lifetimes(mut self, lifetimes: SessionLifetimes) -> Self {
        self.lifetimes = lifetimes;
        self
    }

    pub fn lifetimes(&self) -> SessionLifetimes {
        self.lifetimes
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint an access/refresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `access_claims` - Claims for the access token
    /// * `refresh_claims` - Claims for the refresh token
    ///
    /// # Returns
    /// TokenPair with both tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `JwtError` - Token generation failed
    pub fn authenticate<A: Serialize, R: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        access_claims: &A,
        refresh_claims: &R,
    ) -> Result<TokenPair, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self
            .token_codec
            .issue(access_claims, self.lifetimes.access)?;
        let refresh_token = self.issue_refresh_token(refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mint a refresh token without password verification.
    ///
    /// Used by the refresh flow once the presented refresh token checked out.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_refresh_token<R: Serialize>(&self, claims: &R) -> Result<String, JwtError> {
        self.token_codec.issue(claims, self.lifetimes.refresh)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `JwtError::Rejected` - Token is malformed, tampered or expired
    pub fn validate_token<T: DeserializeOwned>(&self, token: &str) -> Result<Verified<T>, JwtError> {
        self.token_codec.verify(token)
    }
}
