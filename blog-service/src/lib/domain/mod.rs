pub mod auth;
pub mod pagination;
pub mod post;
pub mod user;
