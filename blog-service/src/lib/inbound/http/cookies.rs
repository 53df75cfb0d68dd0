use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Build the `refreshToken` cookie.
///
/// # Arguments
/// * `token` - Signed refresh token
/// * `lifetime` - Max-Age of the cookie
pub fn refresh_token_cookie(token: String, lifetime: chrono::Duration) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(lifetime.num_seconds()))
        .build()
}

/// Read the refresh token presented by the client, if any.
pub fn refresh_token_from(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}
