use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::claims::split_expiration;
use super::claims::stamp_expiration;
use super::claims::Verified;
use super::errors::JwtError;
use super::errors::TokenRejection;

/// Signs and verifies compact, expiring claim sets.
///
/// Generic over the claims type so each service keeps its own token payload.
/// Uses HS256 (HMAC with SHA-256) with a single shared secret for both
/// directions.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec bound to a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    ///
    /// # Returns
    /// TokenCodec configured with HS256
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has zero length
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration, never from code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Sign claims that expire `ttl` from now.
    ///
    /// # Arguments
    /// * `claims` - Claims to embed (must serialize to a JSON object without `exp`)
    /// * `ttl` - Validity window
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue<T: Serialize>(&self, claims: &T, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(claims, Utc::now(), ttl)
    }

    /// Sign claims that expire `ttl` after `issued_at`.
    pub fn issue_at<T: Serialize>(
        &self,
        claims: &T,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let payload = stamp_expiration(claims, issued_at + ttl)?;

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    ///
    /// # Returns
    /// Decoded claims together with their expiry
    ///
    /// # Errors
    /// * `Rejected` - Token is malformed, carries a bad signature, or has expired
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<Verified<T>, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against an explicit clock reading.
    ///
    /// A token is accepted only while `exp > now`; there is no leeway.
    pub fn verify_at<T: DeserializeOwned>(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Verified<T>, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against `now`.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<Map<String, Value>>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::Rejected(classify(e.kind())))?;

        let (payload, expires_at) =
            split_expiration(token_data.claims).map_err(JwtError::Rejected)?;

        if expires_at <= now {
            return Err(JwtError::Rejected(TokenRejection::Expired));
        }

        let claims = serde_json::from_value(Value::Object(payload))
            .map_err(|_| JwtError::Rejected(TokenRejection::Malformed))?;

        Ok(Verified { claims, expires_at })
    }
}

fn classify(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::InvalidSignature => TokenRejection::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        _ => TokenRejection::Malformed,
    }
}
