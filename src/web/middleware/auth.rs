//! Session verification middleware.
//!
//! Extracts the session cookie, verifies the token, and hands the
//! recovered account identifier to the handler. Requests without a valid
//! session are rejected before any handler runs.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{TokenIssuer, SESSION_COOKIE};
use crate::web::error::ApiError;

/// Extractor for authenticated accounts.
///
/// Handlers taking this extractor only run with a verified session; the
/// wrapped value is the account identifier recovered from the token.
#[derive(Debug, Clone)]
pub struct AuthAccount(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| ApiError::unauthorized("Unauthenticated"))?;

        // Issuer is injected into request extensions by session_context
        let issuer = parts
            .extensions
            .get::<Arc<TokenIssuer>>()
            .ok_or_else(|| {
                tracing::error!("Token issuer not configured on the request");
                ApiError::internal()
            })?;

        let account_id = issuer.verify(&token).map_err(|e| {
            tracing::debug!("Session token rejected: {e}");
            ApiError::unauthorized("Unauthenticated")
        })?;

        Ok(AuthAccount(account_id))
    }
}

/// Middleware function injecting the token issuer into request extensions.
pub async fn session_context(
    issuer: Arc<TokenIssuer>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(issuer);
    next.run(request).await
}
