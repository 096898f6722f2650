//! Web API Authentication Tests
//!
//! Integration tests for the account and session endpoints.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_extra::extract::cookie::SameSite;
use axum_test::TestServer;
use chirp::config::{Config, Environment};
use chirp::web::handlers::AppState;
use chirp::web::router::create_router;
use chirp::{AccountRepository, AccountStore, Database, ImageStore, ImageStoreError};
use serde_json::{json, Value};
use std::sync::Arc;

/// Create a test configuration.
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.environment = Environment::Development;
    config.auth.jwt_secret = "test-secret-key-for-testing-only".to_string();
    config
}

/// Image store stub returning a fixed durable URL.
struct FixedImageStore;

#[async_trait]
impl ImageStore for FixedImageStore {
    async fn upload(&self, _image: &str) -> Result<String, ImageStoreError> {
        Ok("https://img.example.com/uploaded.png".to_string())
    }
}

/// Image store stub that always fails.
struct FailingImageStore;

#[async_trait]
impl ImageStore for FailingImageStore {
    async fn upload(&self, _image: &str) -> Result<String, ImageStoreError> {
        Err(ImageStoreError::Upload("upstream unavailable".to_string()))
    }
}

/// Create a test server with an in-memory database.
async fn create_test_server_with(images: Arc<dyn ImageStore>) -> TestServer {
    let config = create_test_config();

    let db = Database::connect_in_memory()
        .await
        .expect("Failed to create test database");
    let store: Arc<dyn AccountStore> = Arc::new(AccountRepository::new(db.pool().clone()));

    let app_state = Arc::new(
        AppState::with_collaborators(&config, store, images).expect("Failed to create app state"),
    );

    let router = create_router(app_state, &config.server.cors_origins);

    TestServer::new(router).expect("Failed to create test server")
}

async fn create_test_server() -> TestServer {
    create_test_server_with(Arc::new(FixedImageStore)).await
}

/// Helper to sign up a test account and return the response body.
async fn signup_account(server: &TestServer, full_name: &str, email: &str, password: &str) -> Value {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": full_name,
            "email": email,
            "password": password
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

// ============================================================================
// Health Check
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("Api is working!");
}

// ============================================================================
// Signup Tests
// ============================================================================

#[tokio::test]
async fn test_signup_success() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "password": "secret1"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert!(body["id"].is_string());
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["fullName"], "Ada");
    assert_eq!(body["email"], "ada@x.com");
    assert_eq!(body["profilePic"], "");
    // The password hash never appears in the public view
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_signup_sets_session_cookie() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "password": "secret1"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let cookie = response.cookie("jwt");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    // Development mode: no Secure attribute
    assert_ne!(cookie.secure(), Some(true));
}

#[tokio::test]
async fn test_signup_cookie_authenticates() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "password": "secret1"
        }))
        .await;
    let body: Value = response.json();
    let cookie = response.cookie("jwt");

    // The issued cookie verifies to the new account's identifier
    let check = server.get("/api/auth/check").add_cookie(cookie).await;
    check.assert_status_ok();
    let check_body: Value = check.json();
    assert_eq!(check_body["id"], body["id"]);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let server = create_test_server().await;
    signup_account(&server, "Ada", "ada@x.com", "secret1").await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "Imposter",
            "email": "ada@x.com",
            "password": "secret2"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let server = create_test_server().await;

    // Empty full name
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "",
            "email": "ada@x.com",
            "password": "secret1"
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Password too short
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "password": "short"
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    // No cookie was issued on a failed signup
    assert!(response.maybe_cookie("jwt").is_none());
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = create_test_server().await;
    let created = signup_account(&server, "Ada", "ada@x.com", "secret1").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "ada@x.com",
            "password": "secret1"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["fullName"], "Ada");
    assert!(body.get("password").is_none());

    let cookie = response.cookie("jwt");
    assert!(!cookie.value().is_empty());
}

#[tokio::test]
async fn test_login_rejections_are_indistinguishable() {
    let server = create_test_server().await;
    signup_account(&server, "Ada", "ada@x.com", "secret1").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "ada@x.com",
            "password": "wrong-pass"
        }))
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);

    let unknown_email = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "ghost@x.com",
            "password": "secret1"
        }))
        .await;
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);

    // Identical bodies: the response must not reveal whether the email exists
    let body_a: Value = wrong_password.json();
    let body_b: Value = unknown_email.json();
    assert_eq!(body_a, body_b);
    assert_eq!(body_a["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_validation() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "",
            "password": "secret1"
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_clears_cookie() {
    let server = create_test_server().await;
    signup_account(&server, "Ada", "ada@x.com", "secret1").await;

    let response = server.post("/api/auth/logout").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "Logged out successfully");

    let cookie = response.cookie("jwt");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let server = create_test_server().await;

    // No session at all: logging out still succeeds with the same effect
    let first = server.post("/api/auth/logout").await;
    let second = server.post("/api/auth/logout").await;

    first.assert_status_ok();
    second.assert_status_ok();

    let cookie_a = first.cookie("jwt");
    let cookie_b = second.cookie("jwt");
    assert_eq!(cookie_a.value(), cookie_b.value());
    assert_eq!(cookie_a.max_age(), cookie_b.max_age());
}

// ============================================================================
// Check Tests
// ============================================================================

#[tokio::test]
async fn test_check_requires_session() {
    let server = create_test_server().await;

    let response = server.get("/api/auth/check").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_check_rejects_garbage_cookie() {
    let server = create_test_server().await;

    let cookie = axum_extra::extract::cookie::Cookie::new("jwt", "not-a-token");
    let response = server.get("/api/auth/check").add_cookie(cookie).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Update Profile Tests
// ============================================================================

#[tokio::test]
async fn test_update_profile_requires_session() {
    let server = create_test_server().await;

    let response = server
        .put("/api/auth/update-profile")
        .json(&json!({ "fullName": "Renamed" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile_partial() {
    let server = create_test_server().await;

    let signup = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "password": "secret1"
        }))
        .await;
    let cookie = signup.cookie("jwt");

    let response = server
        .put("/api/auth/update-profile")
        .add_cookie(cookie.clone())
        .json(&json!({ "fullName": "Ada Lovelace" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["fullName"], "Ada Lovelace");
    // Untouched fields are preserved
    assert_eq!(body["email"], "ada@x.com");
    assert_eq!(body["profilePic"], "");

    // The stored account reflects the change
    let check = server.get("/api/auth/check").add_cookie(cookie).await;
    let check_body: Value = check.json();
    assert_eq!(check_body["fullName"], "Ada Lovelace");
    assert_eq!(check_body["email"], "ada@x.com");
}

#[tokio::test]
async fn test_update_profile_nothing_to_update() {
    let server = create_test_server().await;

    let signup = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "password": "secret1"
        }))
        .await;
    let cookie = signup.cookie("jwt");

    let response = server
        .put("/api/auth/update-profile")
        .add_cookie(cookie.clone())
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    // Stored account is unchanged
    let check = server.get("/api/auth/check").add_cookie(cookie).await;
    let check_body: Value = check.json();
    assert_eq!(check_body["fullName"], "Ada");
    assert_eq!(check_body["email"], "ada@x.com");
}

#[tokio::test]
async fn test_update_profile_image() {
    let server = create_test_server().await;

    let signup = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "password": "secret1"
        }))
        .await;
    let cookie = signup.cookie("jwt");

    let response = server
        .put("/api/auth/update-profile")
        .add_cookie(cookie)
        .json(&json!({ "profilePic": "data:image/png;base64,AAAA" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    // The persisted value is the image store's durable URL, not the input
    assert_eq!(body["profilePic"], "https://img.example.com/uploaded.png");
    assert_eq!(body["fullName"], "Ada");
}

#[tokio::test]
async fn test_update_profile_image_failure_fails_update() {
    let server = create_test_server_with(Arc::new(FailingImageStore)).await;

    let signup = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "password": "secret1"
        }))
        .await;
    let cookie = signup.cookie("jwt");

    let response = server
        .put("/api/auth/update-profile")
        .add_cookie(cookie.clone())
        .json(&json!({
            "fullName": "Renamed",
            "profilePic": "data:image/png;base64,AAAA"
        }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);

    // Fail closed: the name change was not applied either
    let check = server.get("/api/auth/check").add_cookie(cookie).await;
    let check_body: Value = check.json();
    assert_eq!(check_body["fullName"], "Ada");
    assert_eq!(check_body["profilePic"], "");
}
