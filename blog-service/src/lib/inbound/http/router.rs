use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::delete_post::delete_post;
use super::handlers::get_post::get_post;
use super::handlers::get_profile::get_profile;
use super::handlers::get_user::get_user;
use super::handlers::list_posts::list_posts;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::update_post::update_post;
use super::handlers::update_profile::update_profile;
use super::handlers::ApiError;
use super::middleware::authenticate as auth_middleware;
use super::openapi::openapi_json;
use super::rate_limit::rate_limit;
use super::rate_limit::FixedWindowRateLimiter;
use crate::config::Config;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub refresh_cookie_lifetime: chrono::Duration,
}

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Allowed CORS origins; `*` allows any origin
    pub allowed_origins: Vec<String>,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
}

impl From<&Config> for RouterSettings {
    fn from(config: &Config) -> Self {
        Self {
            allowed_origins: config.cors.origins(),
            rate_limit_max_requests: config.rate_limit.max_requests,
            rate_limit_window: Duration::from_secs(config.rate_limit.window_seconds),
        }
    }
}

pub fn create_router(state: AppState, settings: RouterSettings) -> Router {
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/v1/login", post(login))
        .route("/api/v1/register", post(register))
        .route("/api/v1/refresh", post(refresh))
        .route("/api/v1/posts", get(list_posts))
        .route("/api/v1/posts/:post_id", get(get_post))
        .route("/api/v1/users/:user_id", get(get_user));

    let protected_routes = Router::new()
        .route("/api/v1/me", get(get_profile).put(update_profile))
        .route("/api/v1/posts", post(create_post))
        .route(
            "/api/v1/posts/:post_id",
            put(update_post).delete(delete_post),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let limiter = Arc::new(FixedWindowRateLimiter::new(
        settings.rate_limit_max_requests,
        settings.rate_limit_window,
    ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(limiter, rate_limit))
        .layer(trace_layer)
        .layer(cors_layer(&settings.allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

async fn root() -> &'static str {
    "Hello from blog-service!"
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Sorry can't find that!".to_string())
}
