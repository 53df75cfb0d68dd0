//! Authentication utilities library
//!
//! Provides the session building blocks used by the blog service:
//! - Password hashing (Argon2id)
//! - Expiring, HS256-signed claim sets
//! - Access/refresh token coordination
//!
//! The service defines its own claims types; this crate only adds and checks
//! the `exp` claim and the signature.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//! use serde_json::json;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = codec.issue(&json!({ "user_id": 1 }), Duration::hours(1)).unwrap();
//! let verified = codec.verify::<serde_json::Value>(&token).unwrap();
//! assert_eq!(verified.claims["user_id"], 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::SessionLifetimes;
pub use authenticator::TokenPair;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use jwt::TokenRejection;
pub use jwt::Verified;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
