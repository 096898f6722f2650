//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{check, login, logout, signup, update_profile, AppState};
use super::middleware::{create_cors_layer, security_headers, session_context};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/update-profile", put(update_profile))
        .route("/check", get(check));

    let api_routes = Router::new().nest("/auth", auth_routes);

    // Clone the issuer for the middleware closure
    let issuer = app_state.issuer.clone();

    Router::new()
        .route("/", get(health_check))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers))
                .layer(middleware::from_fn(move |req, next| {
                    let issuer = issuer.clone();
                    session_context(issuer, req, next)
                })),
        )
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "Api is working!"
}
