use axum::extract::State;
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserName;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::Violations;

#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered successfully", body = UserData),
        (status = 400, description = "Validation errors"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::ok("User registered successfully", user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ApiError> {
        let mut violations = Violations::new();

        let name = violations.check("name", &self.name, UserName::new(self.name.clone()));
        let email = violations.check("email", &self.email, EmailAddress::new(self.email.clone()));
        let password = violations.check_secret("password", Password::new(self.password));

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => {
                Ok(CreateUserCommand::new(name, email, password))
            }
            _ => Err(violations.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_invalid_field_is_reported() {
        let request = RegisterRequest {
            name: "Al".to_string(),
            email: "nope".to_string(),
            password: "123".to_string(),
        };

        let ApiError::Validation(violations) = request.try_into_command().unwrap_err() else {
            panic!("expected validation error");
        };

        let fields: Vec<&str> = violations.iter().map(|v| v.field_name.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
        assert!(violations[2].value.is_null());
    }

    #[test]
    fn test_valid_request() {
        let request = RegisterRequest {
            name: "Alice Doe".to_string(),
            email: "alice@x.com".to_string(),
            password: "secret1".to_string(),
        };

        let command = request.try_into_command().unwrap();
        assert_eq!(command.name.as_str(), "Alice Doe");
        assert_eq!(command.password.as_str(), "secret1");
    }
}
