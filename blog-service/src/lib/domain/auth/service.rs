use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessClaims;
use crate::domain::auth::models::BearerToken;
use crate::domain::auth::models::RefreshClaims;
use crate::domain::auth::models::SessionTokens;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Session protocol over the credential store and the authenticator.
///
/// Stateless between calls: tokens are never stored, so every request is
/// authenticated from its own token alone.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `authenticator` - Password hasher and token codec, configured at startup
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Load the subject of a verified token.
    ///
    /// A subject that no longer exists is reported the same way as a bad token.
    async fn token_subject(&self, user_id: &UserId) -> Result<User, AuthError> {
        self.repository
            .find_by_id(user_id)
            .await
            .map_err(AuthError::from)?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Token subject no longer exists");
                AuthError::Unauthorized
            })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<SessionTokens, AuthError> {
        let user = self
            .repository
            .find_by_email(email)
            .await
            .map_err(AuthError::from)?
            .ok_or_else(|| AuthError::NotFound(email.to_string()))?;

        // Argon2 runs on the blocking pool.
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let access_claims = AccessClaims::for_user(&user);
        let refresh_claims = RefreshClaims::for_user(&user);

        let pair = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &access_claims, &refresh_claims)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::PasswordError(err) => {
                AuthError::Internal(format!("Password verification failed: {}", err))
            }
            AuthenticationError::JwtError(err) => {
                AuthError::Internal(format!("Token generation failed: {}", err))
            }
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(pair.into())
    }

    async fn register(&self, command: CreateUserCommand) -> Result<User, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
                .await
                .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
                .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
            })
            .await
            .map_err(AuthError::from)?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let verified = self
            .authenticator
            .validate_token::<RefreshClaims>(refresh_token)
            .map_err(|e| {
                tracing::warn!(error = ?e, "Refresh token rejected");
                AuthError::Unauthorized
            })?;

        let user = self.token_subject(&verified.claims.user_id).await?;

        self.authenticator
            .issue_refresh_token(&RefreshClaims::for_user(&user))
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }

    async fn resolve_identity(&self, bearer_header: &str) -> Result<User, AuthError> {
        let token = BearerToken::parse(bearer_header)?;

        let verified = self
            .authenticator
            .validate_token::<AccessClaims>(token.as_str())
            .map_err(|e| {
                tracing::warn!(error = ?e, "Access token rejected");
                AuthError::Unauthorized
            })?;

        self.token_subject(&verified.claims.user_id).await
    }
}
