use axum::extract::State;
use axum::Extension;
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::UserData;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UserName;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::Violations;

#[utoipa::path(
    put,
    path = "/api/v1/me",
    tag = "Users",
    security(("bearer" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "User profile updated successfully", body = UserData),
        (status = 400, description = "Validation errors or malformed JWT"),
        (status = 401, description = "Invalid or expired JWT")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<UpdateProfileRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .user_service
        .update_profile(&authenticated.user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::ok("User profile updated successfully", user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    name: String,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ApiError> {
        let mut violations = Violations::new();

        match violations.check("name", &self.name, UserName::new(self.name.clone())) {
            Some(name) => Ok(UpdateProfileCommand { name }),
            None => Err(violations.into()),
        }
    }
}
