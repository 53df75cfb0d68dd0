use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User profile retrieved successfully", body = UserData),
        (status = 400, description = "Missing or malformed JWT"),
        (status = 401, description = "Invalid or expired JWT")
    )
)]
pub async fn get_profile(
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::ok(
        "User profile retrieved successfully",
        (&authenticated.user).into(),
    ))
}
