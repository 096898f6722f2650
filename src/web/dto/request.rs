//! Request DTOs for the Web API.

use serde::Deserialize;
use validator::Validate;

/// Signup request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Profile update request. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// New email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Raw profile image input (data URL).
    #[serde(default)]
    pub profile_pic: Option<String>,
}
