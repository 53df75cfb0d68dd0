use axum::extract::State;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::cookies::refresh_token_cookie;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::Violations;

/// Log in with email and password.
///
/// The refresh token is returned in the body and also set as the
/// `refreshToken` cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User logged in successfully", body = LoginResponseData),
        (status = 400, description = "Validation errors or invalid email or password"),
        (status = 404, description = "User not found")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let (email, password) = body.try_into_credentials()?;

    let tokens = state.auth_service.login(&email, &password).await?;

    let jar = jar.add(refresh_token_cookie(
        tokens.refresh_token.clone(),
        state.refresh_cookie_lifetime,
    ));

    Ok((
        jar,
        ApiSuccess::ok(
            "User logged in successfully",
            LoginResponseData {
                token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn try_into_credentials(self) -> Result<(EmailAddress, String), ApiError> {
        let mut violations = Violations::new();

        let email = violations.check("email", &self.email, EmailAddress::new(self.email.clone()));
        let password = violations
            .require_secret("password", &self.password)
            .map(str::to_string);

        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(violations.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LoginResponseData {
    /// Access token, sent as `Authorization: Bearer <token>`
    pub token: String,
    pub refresh_token: String,
}
