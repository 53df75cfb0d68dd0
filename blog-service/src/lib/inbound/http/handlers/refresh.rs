use axum::extract::State;
use axum_extra::extract::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::errors::AuthError;
use crate::inbound::http::cookies::refresh_token_cookie;
use crate::inbound::http::cookies::refresh_token_from;
use crate::inbound::http::router::AppState;

const REFRESH_FAILED: &str = "Could not refresh token";

/// Exchange the `refreshToken` cookie for a new refresh token.
///
/// Only the refresh token is reissued.
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    tag = "Auth",
    responses(
        (status = 200, description = "Token refreshed successfully", body = RefreshResponseData),
        (status = 401, description = "Could not refresh token")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<RefreshResponseData>), ApiError> {
    let presented = refresh_token_from(&jar).ok_or_else(|| {
        tracing::debug!("Refresh requested without a refresh token cookie");
        ApiError::Unauthorized(REFRESH_FAILED.to_string())
    })?;

    let token = state
        .auth_service
        .refresh(&presented)
        .await
        .map_err(|e| match e {
            AuthError::Unauthorized => ApiError::Unauthorized(REFRESH_FAILED.to_string()),
            other => ApiError::from(other),
        })?;

    let jar = jar.add(refresh_token_cookie(
        token.clone(),
        state.refresh_cookie_lifetime,
    ));

    Ok((
        jar,
        ApiSuccess::ok(
            "Token refreshed successfully",
            RefreshResponseData {
                refresh_token: token,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RefreshResponseData {
    pub refresh_token: String,
}
