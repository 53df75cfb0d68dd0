use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::PostData;
use crate::domain::post::models::PostBody;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::models::UpdatePostCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::Violations;

/// Update title and/or body of one of the caller's posts.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    security(("bearer" = [])),
    params(("post_id" = i64, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Successfully updated post", body = PostData),
        (status = 400, description = "Validation errors or malformed JWT"),
        (status = 401, description = "Invalid or expired JWT"),
        (status = 403, description = "Post belongs to another user"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    JsonBody(body): JsonBody<UpdatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id =
        PostId::from_string(&post_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .post_service
        .update_post(&post_id, &authenticated.user.id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::ok("Successfully updated post", post.into()))
}

/// HTTP request body for updating a post. Absent or empty fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    title: Option<String>,
    body: Option<String>,
}

impl UpdatePostRequest {
    fn try_into_command(self) -> Result<UpdatePostCommand, ApiError> {
        let mut violations = Violations::new();
        let mut rejected = false;

        let title = self.title.filter(|t| !t.is_empty()).and_then(|title| {
            let parsed = violations.check("title", &title, PostTitle::new(title.clone()));
            rejected |= parsed.is_none();
            parsed
        });

        let body = self.body.filter(|b| !b.is_empty()).and_then(|body| {
            let parsed = violations.check("body", &body, PostBody::new(body.clone()));
            rejected |= parsed.is_none();
            parsed
        });

        if rejected {
            return Err(violations.into());
        }

        Ok(UpdatePostCommand { title, body })
    }
}
