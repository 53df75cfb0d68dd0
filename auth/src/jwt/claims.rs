use chrono::DateTime;
use chrono::Utc;
use serde_json::Map;
use serde_json::Value;

use super::errors::JwtError;
use super::errors::TokenRejection;

/// Name of the registered expiration claim (RFC 7519).
pub const EXPIRATION_CLAIM: &str = "exp";

/// Claims recovered from a verified token.
///
/// The codec owns the `exp` claim: it is stripped from the payload before the
/// caller's claims type is deserialized and surfaced here as `expires_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Verified<T> {
    /// Caller-defined claims
    pub claims: T,

    /// Instant after which the token is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl<T> Verified<T> {
    /// Drop the expiry and keep only the claims.
    pub fn into_claims(self) -> T {
        self.claims
    }
}

/// Serialize caller claims and stamp them with an expiration.
///
/// # Errors
/// * `EncodingFailed` - Claims are not a JSON object or already carry `exp`
pub(crate) fn stamp_expiration<T: serde::Serialize>(
    claims: &T,
    expires_at: DateTime<Utc>,
) -> Result<Map<String, Value>, JwtError> {
    let value =
        serde_json::to_value(claims).map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

    let mut payload = match value {
        Value::Object(map) => map,
        _ => {
            return Err(JwtError::EncodingFailed(
                "claims must serialize to a JSON object".to_string(),
            ))
        }
    };

    if payload.contains_key(EXPIRATION_CLAIM) {
        return Err(JwtError::EncodingFailed(format!(
            "claims must not set '{}' themselves",
            EXPIRATION_CLAIM
        )));
    }

    payload.insert(
        EXPIRATION_CLAIM.to_string(),
        Value::from(expires_at.timestamp()),
    );
    Ok(payload)
}

/// Remove `exp` from a decoded payload.
pub(crate) fn split_expiration(
    mut payload: Map<String, Value>,
) -> Result<(Map<String, Value>, DateTime<Utc>), TokenRejection> {
    let expires_at = payload
        .remove(EXPIRATION_CLAIM)
        .and_then(|v| v.as_i64())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or(TokenRejection::Malformed)?;

    Ok((payload, expires_at))
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct UserClaims {
        user_id: i64,
    }

    #[test]
    fn test_stamp_adds_exp() {
        let expires_at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let payload = stamp_expiration(&UserClaims { user_id: 7 }, expires_at).unwrap();

        assert_eq!(payload.get("user_id"), Some(&Value::from(7)));
        assert_eq!(payload.get("exp"), Some(&Value::from(1_700_000_000_i64)));
    }

    #[test]
    fn test_stamp_rejects_non_object() {
        let result = stamp_expiration(&"just a string", Utc::now());
        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }

    #[test]
    fn test_stamp_rejects_caller_exp() {
        let mut claims = Map::new();
        claims.insert("exp".to_string(), Value::from(1));

        let result = stamp_expiration(&claims, Utc::now());
        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }

    #[test]
    fn test_split_requires_numeric_exp() {
        let mut payload = Map::new();
        payload.insert("exp".to_string(), Value::from("tomorrow"));

        assert_eq!(
            split_expiration(payload).unwrap_err(),
            TokenRejection::Malformed
        );
        assert_eq!(
            split_expiration(Map::new()).unwrap_err(),
            TokenRejection::Malformed
        );
    }
}
