use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::handlers::ApiError;

/// One rejected request field, as reported to the client.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub error: bool,
    pub field_name: String,
    #[schema(value_type = Object)]
    pub value: Value,
    pub message: String,
}

/// Collects field violations while a request body is parsed into domain
/// types, so that every invalid field is reported at once.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of parsing one field.
    ///
    /// # Returns
    /// The parsed value, or None when the field was rejected
    pub fn check<T, E: Display>(
        &mut self,
        field_name: &str,
        value: &str,
        result: Result<T, E>,
    ) -> Option<T> {
        self.record(field_name, Value::from(value), result)
    }

    /// Like `check`, but the submitted value is not echoed back.
    pub fn check_secret<T, E: Display>(
        &mut self,
        field_name: &str,
        result: Result<T, E>,
    ) -> Option<T> {
        self.record(field_name, Value::Null, result)
    }

    /// Reject an empty value for a field that has no other constraint.
    pub fn require_secret<'a>(&mut self, field_name: &str, value: &'a str) -> Option<&'a str> {
        let result = if value.is_empty() {
            Err(format!("{} is required", capitalize(field_name)))
        } else {
            Ok(value)
        };
        self.check_secret(field_name, result)
    }

    fn record<T, E: Display>(
        &mut self,
        field_name: &str,
        value: Value,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.0.push(FieldViolation {
                    error: true,
                    field_name: field_name.to_string(),
                    value,
                    message: e.to_string(),
                });
                None
            }
        }
    }
}

impl From<Violations> for ApiError {
    fn from(violations: Violations) -> Self {
        ApiError::Validation(violations.0)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_violation() {
        let mut violations = Violations::new();

        let name = violations.check("name", "Al", Err::<(), _>("Name too short"));
        let email = violations.check("email", "alice@x.com", Ok::<_, String>("alice@x.com"));
        let password = violations.check_secret("password", Err::<(), _>("Password too short"));

        assert!(name.is_none());
        assert_eq!(email, Some("alice@x.com"));
        assert!(password.is_none());

        let ApiError::Validation(list) = ApiError::from(violations) else {
            panic!("expected validation error");
        };
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].field_name, "name");
        assert_eq!(list[0].value, Value::from("Al"));
        assert_eq!(list[1].field_name, "password");
        assert_eq!(list[1].value, Value::Null);
    }

    #[test]
    fn test_require_secret() {
        let mut violations = Violations::new();
        assert!(violations.require_secret("password", "").is_none());
        assert_eq!(violations.0[0].message, "Password is required");
        assert_eq!(violations.0[0].value, Value::Null);
    }
}
