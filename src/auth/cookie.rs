//! Session cookie policy for chirp.
//!
//! The session token travels in a single cookie with a fixed security
//! policy. The attributes are not parameterized per call site, so a handler
//! cannot accidentally weaken them.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use super::token::SESSION_TTL_DAYS;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "jwt";

/// Build the session cookie carrying a signed token.
///
/// Policy: not readable by scripts (HttpOnly), no cross-site delivery
/// (SameSite=Strict), lifetime matching the token's validity window, and
/// encrypted transport only (`secure`) outside local development.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Build a cookie that clears the client-held session.
///
/// Writes an empty value with zero lifetime. This only invalidates the
/// client's copy; a token cached elsewhere remains valid until expiry
/// (no server-side revocation list).
pub fn clear_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}
