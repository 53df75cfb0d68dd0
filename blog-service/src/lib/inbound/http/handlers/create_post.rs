use axum::extract::State;
use axum::Extension;
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::PostData;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PostBody;
use crate::domain::post::models::PostTitle;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::Violations;

/// Create a post owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "Posts",
    security(("bearer" = [])),
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Successfully created post", body = PostData),
        (status = 400, description = "Validation errors or malformed JWT"),
        (status = 401, description = "Invalid or expired JWT")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let author = authenticated.user;

    state
        .post_service
        .create_post(&author.id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref post| {
            ApiSuccess::ok(
                "Successfully created post",
                PostData::from(post).with_author(&author),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

impl CreatePostRequest {
    fn try_into_command(self) -> Result<CreatePostCommand, ApiError> {
        let mut violations = Violations::new();

        let title = violations.check("title", &self.title, PostTitle::new(self.title.clone()));
        let body = violations.check("body", &self.body, PostBody::new(self.body.clone()));

        match (title, body) {
            (Some(title), Some(body)) => Ok(CreatePostCommand { title, body }),
            _ => Err(violations.into()),
        }
    }
}
