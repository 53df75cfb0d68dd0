use async_trait::async_trait;

use crate::domain::pagination::Pagination;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post owned by `author_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        author_id: &UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError>;

    /// Retrieve a post by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: &PostId) -> Result<Post, PostError>;

    /// List posts, newest first.
    async fn list_posts(&self, pagination: &Pagination) -> Result<Vec<Post>, PostError>;

    /// List the posts of one author, newest first.
    async fn list_posts_by_author(
        &self,
        author_id: &UserId,
        pagination: &Pagination,
    ) -> Result<Vec<Post>, PostError>;

    /// Apply the provided fields to a post owned by `requester`.
    ///
    /// # Arguments
    /// * `id` - Post to update
    /// * `requester` - Authenticated user making the change
    /// * `command` - Optional new title and body
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Forbidden` - Post belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        id: &PostId,
        requester: &UserId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError>;

    /// Delete a post owned by `requester`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Forbidden` - Post belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, id: &PostId, requester: &UserId) -> Result<(), PostError>;
}

/// Post persistence port.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    /// Page through all posts ordered by id descending.
    async fn list(&self, pagination: &Pagination) -> Result<Vec<Post>, PostError>;

    /// Page through one author's posts ordered by id descending.
    async fn list_by_author(
        &self,
        author_id: &UserId,
        pagination: &Pagination,
    ) -> Result<Vec<Post>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn update(&self, post: Post) -> Result<Post, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn delete(&self, id: &PostId) -> Result<(), PostError>;
}
