pub mod cookies;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod rate_limit;
pub mod router;
pub mod validation;
