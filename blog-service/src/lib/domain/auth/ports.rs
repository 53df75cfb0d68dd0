use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::SessionTokens;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Port for the session protocol.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check credentials and mint an access/refresh token pair.
    ///
    /// # Arguments
    /// * `email` - Login identifier
    /// * `password` - Plaintext password
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Internal` - Store, hashing or signing failure
    async fn login(&self, email: &EmailAddress, password: &str)
        -> Result<SessionTokens, AuthError>;

    /// Hash the password and persist a new user.
    ///
    /// # Errors
    /// * `Conflict` - Email is already registered
    /// * `Internal` - Store or hashing failure
    async fn register(&self, command: CreateUserCommand) -> Result<User, AuthError>;

    /// Exchange a valid refresh token for a new one.
    ///
    /// The access token is not reissued.
    ///
    /// # Errors
    /// * `Unauthorized` - Token rejected or its user no longer exists
    /// * `Internal` - Store or signing failure
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Resolve the user behind an `Authorization` header value.
    ///
    /// # Errors
    /// * `Malformed` - Header is not exactly `Bearer <token>`
    /// * `Unauthorized` - Token rejected or its user no longer exists
    /// * `Internal` - Store failure
    async fn resolve_identity(&self, bearer_header: &str) -> Result<User, AuthError>;
}
