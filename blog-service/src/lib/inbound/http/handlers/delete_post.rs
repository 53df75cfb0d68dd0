use axum::extract::Path;
use axum::extract::State;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::Empty;
use crate::domain::post::models::PostId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    security(("bearer" = [])),
    params(("post_id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Successfully deleted post"),
        (status = 400, description = "Invalid post ID or malformed JWT"),
        (status = 401, description = "Invalid or expired JWT"),
        (status = 403, description = "Post belongs to another user"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<Empty>, ApiError> {
    let post_id =
        PostId::from_string(&post_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .post_service
        .delete_post(&post_id, &authenticated.user.id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::ok("Successfully deleted post", Empty {}))
}
