use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::pagination::Pagination;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    /// Create a new post service.
    ///
    /// # Arguments
    /// * `repository` - Post persistence implementation
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    /// Load a post and check that `requester` owns it.
    ///
    /// Existence is checked first, so a missing post is `NotFound` for
    /// everyone.
    async fn owned_post(&self, id: &PostId, requester: &UserId) -> Result<Post, PostError> {
        let post = self.get_post(id).await?;

        if !post.is_owned_by(requester) {
            tracing::warn!(
                post_id = %id,
                user_id = %requester,
                "Refused change to a post owned by another user"
            );
            return Err(PostError::Forbidden {
                post_id: id.to_string(),
                user_id: requester.to_string(),
            });
        }

        Ok(post)
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        author_id: &UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post = self
            .repository
            .create(NewPost {
                title: command.title,
                body: command.body,
                author_id: *author_id,
            })
            .await?;

        tracing::info!(post_id = %post.id, user_id = %author_id, "Post created");

        Ok(post)
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn list_posts(&self, pagination: &Pagination) -> Result<Vec<Post>, PostError> {
        self.repository.list(pagination).await
    }

    async fn list_posts_by_author(
        &self,
        author_id: &UserId,
        pagination: &Pagination,
    ) -> Result<Vec<Post>, PostError> {
        self.repository.list_by_author(author_id, pagination).await
    }

    async fn update_post(
        &self,
        id: &PostId,
        requester: &UserId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self.owned_post(id, requester).await?;

        if let Some(new_title) = command.title {
            post.title = new_title;
        }

        if let Some(new_body) = command.body {
            post.body = new_body;
        }

        self.repository.update(post).await
    }

    async fn delete_post(&self, id: &PostId, requester: &UserId) -> Result<(), PostError> {
        self.owned_post(id, requester).await?;
        self.repository.delete(id).await?;

        tracing::info!(post_id = %id, user_id = %requester, "Post deleted");

        Ok(())
    }
}
