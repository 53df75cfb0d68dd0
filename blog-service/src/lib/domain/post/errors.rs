use thiserror::Error;

/// Error for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid post id: {0}")]
    InvalidFormat(String),
}

/// Error for PostTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Title must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for PostBody validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("Body must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid body: {0}")]
    InvalidBody(#[from] BodyError),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("User {user_id} does not own post {post_id}")]
    Forbidden { post_id: String, user_id: String },

    #[error("Database error: {0}")]
    DatabaseError(String),
}
