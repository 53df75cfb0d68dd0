#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::HashingCost;
use auth::PasswordHasher;
use auth::TokenCodec;
use blog_service::domain::auth::service::AuthService;
use blog_service::domain::pagination::Pagination;
use blog_service::domain::post::errors::PostError;
use blog_service::domain::post::models::NewPost;
use blog_service::domain::post::models::Post;
use blog_service::domain::post::models::PostId;
use blog_service::domain::post::ports::PostRepository;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::errors::UserError;
use blog_service::domain::user::models::EmailAddress;
use blog_service::domain::user::models::NewUser;
use blog_service::domain::user::models::User;
use blog_service::domain::user::models::UserId;
use blog_service::domain::user::ports::UserRepository;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::router::AppState;
use blog_service::inbound::http::router::RouterSettings;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(RouterSettings {
            allowed_origins: vec!["*".to_string()],
            rate_limit_max_requests: 10_000,
            rate_limit_window: Duration::from_secs(60),
        })
        .await
    }

    pub async fn spawn_with(settings: RouterSettings) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap hashing keeps the suite fast.
        let password_hasher = PasswordHasher::with_cost(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to create password hasher");

        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET)
                .expect("Failed to create authenticator")
                .with_password_hasher(password_hasher),
        );

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let post_repository = Arc::new(InMemoryPostRepository::default());

        let state = AppState {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&user_repository),
                authenticator,
            )),
            user_service: Arc::new(UserService::new(user_repository)),
            post_service: Arc::new(PostService::new(post_repository)),
            refresh_cookie_lifetime: chrono::Duration::hours(24),
        };

        let router = create_router(state, settings);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            token_codec: TokenCodec::new(TEST_SECRET).expect("Failed to create token codec"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user and return the `data` of the response.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/v1/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return `(access_token, refresh_token)`.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post("/api/v1/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["token"].as_str().unwrap().to_string(),
            body["data"]["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Register and log in, returning the user id and access token.
    pub async fn signed_in(&self, name: &str, email: &str) -> (i64, String) {
        let user = self.register(name, email, "secret1").await;
        let (access_token, _) = self.login(email, "secret1").await;
        (user["id"].as_i64().unwrap(), access_token)
    }

    /// Create a post as the given user and return its id.
    pub async fn create_post(&self, token: &str, title: &str, body: &str) -> i64 {
        let response = self
            .post("/api/v1/posts")
            .bearer_auth(token)
            .json(&json!({ "title": title, "body": body }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().unwrap()
    }
}

/// Credential store kept in memory.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let created = User {
            id: UserId(users.len() as i64 + 1),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == *email).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id.to_string()))?;
        *stored = user.clone();

        Ok(user)
    }
}

/// Post store kept in memory, keyed by id.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<BTreeMap<i64, Post>>,
}

impl InMemoryPostRepository {
    fn page<'a>(posts: impl Iterator<Item = &'a Post>, pagination: &Pagination) -> Vec<Post> {
        posts
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let mut posts = self.posts.lock().unwrap();

        let id = posts.keys().next_back().copied().unwrap_or(0) + 1;
        let created = Post {
            id: PostId(id),
            title: post.title,
            body: post.body,
            author_id: post.author_id,
        };
        posts.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.get(&id.0).cloned())
    }

    async fn list(&self, pagination: &Pagination) -> Result<Vec<Post>, PostError> {
        let posts = self.posts.lock().unwrap();
        Ok(Self::page(posts.values().rev(), pagination))
    }

    async fn list_by_author(
        &self,
        author_id: &UserId,
        pagination: &Pagination,
    ) -> Result<Vec<Post>, PostError> {
        let posts = self.posts.lock().unwrap();
        Ok(Self::page(
            posts.values().rev().filter(|p| p.author_id == *author_id),
            pagination,
        ))
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let mut posts = self.posts.lock().unwrap();

        match posts.get_mut(&post.id.0) {
            Some(stored) => {
                *stored = post.clone();
                Ok(post)
            }
            None => Err(PostError::NotFound(post.id.to_string())),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        let mut posts = self.posts.lock().unwrap();

        posts
            .remove(&id.0)
            .map(|_| ())
            .ok_or(PostError::NotFound(id.to_string()))
    }
}
