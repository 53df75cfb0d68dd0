use std::fmt;

use crate::domain::post::errors::BodyError;
use crate::domain::post::errors::PostIdError;
use crate::domain::post::errors::TitleError;
use crate::domain::user::models::UserId;

/// Post aggregate entity.
///
/// Owned by the user who created it; only the owner may change or delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub body: PostBody,
    pub author_id: UserId,
}

impl Post {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.author_id == *user_id
    }
}

/// Post unique identifier type, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub i64);

impl PostId {
    /// Parse a post ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        s.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(PostId)
            .ok_or_else(|| PostIdError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post title value type
///
/// Ensures the title is 8-30 characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 30;

    /// Create a new valid title.
    ///
    /// # Errors
    /// * `TooShort` - Title shorter than 8 characters
    /// * `TooLong` - Title longer than 30 characters
    pub fn new(title: String) -> Result<Self, TitleError> {
        let length = title.chars().count();
        if length < Self::MIN_LENGTH {
            Err(TitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post body value type, at least 8 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    const MIN_LENGTH: usize = 8;

    pub fn new(body: String) -> Result<Self, BodyError> {
        let length = body.chars().count();
        if length < Self::MIN_LENGTH {
            Err(BodyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(body))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post record to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: PostTitle,
    pub body: PostBody,
    pub author_id: UserId,
}

/// Command to create a post with domain types
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: PostTitle,
    pub body: PostBody,
}

/// Command to update a post with optional validated fields.
///
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdatePostCommand {
    pub title: Option<PostTitle>,
    pub body: Option<PostBody>,
}
