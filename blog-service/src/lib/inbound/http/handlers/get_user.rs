use axum::extract::Path;
use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use super::PageQuery;
use super::PostData;
use super::UserData;
use crate::domain::pagination::Pagination;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Fetch a user together with a page of their posts.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    params(("user_id" = i64, Path, description = "User ID"), PageQuery),
    responses(
        (status = 200, description = "Successfully fetched users with post", body = UserWithPostsData),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: PageQuery,
) -> Result<ApiSuccess<UserWithPostsData>, ApiError> {
    let user_id =
        UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let pagination = Pagination::from(query);

    let user = state.user_service.get_user(&user_id).await?;
    let posts = state
        .post_service
        .list_posts_by_author(&user.id, &pagination)
        .await?;

    Ok(ApiSuccess::ok(
        "Successfully fetched users with post",
        UserWithPostsData {
            user: (&user).into(),
            posts: posts.iter().map(PostData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserWithPostsData {
    pub user: UserData,
    pub posts: Vec<PostData>,
}
