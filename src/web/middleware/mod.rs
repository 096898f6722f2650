//! Middleware for the Web API.

pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{session_context, AuthAccount};
pub use cors::create_cors_layer;
pub use security::security_headers;
