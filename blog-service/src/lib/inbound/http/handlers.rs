use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Query;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use utoipa::IntoParams;
use utoipa::ToSchema;

use super::validation::FieldViolation;
use crate::domain::auth::errors::AuthError;
use crate::domain::pagination::Pagination;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::Post;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod get_profile;
pub mod get_user;
pub mod list_posts;
pub mod login;
pub mod refresh;
pub mod register;
pub mod update_post;
pub mod update_profile;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, data)))
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, data)
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// JSON body extractor whose rejection uses the response envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Validation(Vec<FieldViolation>),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    TooManyRequests(String),
}

impl ApiError {
    /// Log the detail and return a generic 500.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal server error");
        ApiError::InternalServerError("Internal server error".to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("Invalid request payload".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, violations) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                "Validation errors".to_string(),
                Some(violations),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::TooManyRequests(msg) => (StatusCode::TOO_MANY_REQUESTS, msg, None),
        };

        (status, Json(ApiResponseBody::new_error(message, violations))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Malformed(_) => ApiError::BadRequest("Missing or malformed JWT".to_string()),
            AuthError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            AuthError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            AuthError::Unauthorized => ApiError::Unauthorized(err.to_string()),
            AuthError::Conflict(_) => ApiError::Conflict(err.to_string()),
            AuthError::Internal(_) => ApiError::internal(err),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::DatabaseError(_) | UserError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound(_) => ApiError::NotFound("Post not found".to_string()),
            PostError::Forbidden { .. } => {
                ApiError::Forbidden("You can only modify your own posts".to_string())
            }
            PostError::InvalidPostId(_) | PostError::InvalidTitle(_) | PostError::InvalidBody(_) => {
                ApiError::BadRequest(err.to_string())
            }
            PostError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

/// Envelope shared by every JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status: bool,
    message: String,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponseBody<Option<Vec<FieldViolation>>> {
    pub fn new_error(message: String, violations: Option<Vec<FieldViolation>>) -> Self {
        Self {
            status: false,
            message,
            data: violations,
        }
    }
}

/// Empty `data` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Empty {}

/// Public representation of a user. The password hash is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PostData {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserData>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.0,
            title: post.title.as_str().to_string(),
            body: post.body.as_str().to_string(),
            user_id: post.author_id.0,
            user: None,
        }
    }
}

impl PostData {
    pub fn with_author(mut self, author: &User) -> Self {
        self.user = Some(author.into());
        self
    }
}

/// `page` and `perPage` query parameters.
///
/// Extraction never fails: values are kept as strings, the first occurrence
/// of a repeated key wins and anything unparsable falls back to the defaults.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    page: Option<String>,
    /// Page size (default 10, max 100)
    #[serde(rename = "perPage")]
    per_page: Option<String>,
}

impl PageQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = PageQuery::default();

        for (key, value) in pairs {
            match key.as_str() {
                "page" if query.page.is_none() => query.page = Some(value),
                "perPage" if query.per_page.is_none() => query.per_page = Some(value),
                _ => {}
            }
        }

        query
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs,
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Ignoring unparsable query string");
                Vec::new()
            }
        };

        Ok(Self::from_pairs(pairs))
    }
}

impl From<PageQuery> for Pagination {
    fn from(query: PageQuery) -> Self {
        let parse = |value: Option<String>| {
            value
                .and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(0)
        };

        Pagination::new(parse(query.page), parse(query.per_page))
    }
}
