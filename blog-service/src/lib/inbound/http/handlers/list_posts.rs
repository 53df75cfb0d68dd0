use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::PageQuery;
use super::PostData;
use crate::domain::pagination::Pagination;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "Posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Successfully fetched posts, newest first", body = [PostData])
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    query: PageQuery,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let pagination = Pagination::from(query);

    state
        .post_service
        .list_posts(&pagination)
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::ok(
                "Successfully fetched posts",
                posts.iter().map(PostData::from).collect(),
            )
        })
}
