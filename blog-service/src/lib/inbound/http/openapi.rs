use axum::Json;
use utoipa::openapi::security::HttpAuthScheme;
use utoipa::openapi::security::HttpBuilder;
use utoipa::openapi::security::SecurityScheme;
use utoipa::Modify;
use utoipa::OpenApi;

use super::handlers;
use super::validation::FieldViolation;

/// OpenAPI document for the HTTP API.
///
/// Every response is wrapped in `{status, message, data}`; the schemas below
/// describe `data`.
#[derive(OpenApi)]
#[openapi(
    info(title = "blog-service", description = "Users, JWT sessions and posts"),
    paths(
        handlers::login::login,
        handlers::register::register,
        handlers::refresh::refresh,
        handlers::get_profile::get_profile,
        handlers::update_profile::update_profile,
        handlers::get_user::get_user,
        handlers::list_posts::list_posts,
        handlers::get_post::get_post,
        handlers::create_post::create_post,
        handlers::update_post::update_post,
        handlers::delete_post::delete_post,
    ),
    components(schemas(FieldViolation)),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Login, registration and token refresh"),
        (name = "Users", description = "Profiles"),
        (name = "Posts", description = "Posts owned by users"),
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
