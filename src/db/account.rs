//! Account model for chirp.
//!
//! Defines the persistent account record and the change-set types used
//! for creation and partial updates.

/// Account entity representing a registered user.
///
/// The `password` field holds the Argon2 hash, never the plaintext, and is
/// never serialized; clients only ever see [`crate::web::dto::AccountResponse`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Opaque stable identifier (UUID v4), assigned at creation.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Email address (unique, stored case-sensitively).
    pub email: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Profile image URL, empty string when unset.
    pub profile_pic: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new account.
///
/// The identifier is assigned by the caller so that the service controls
/// it before persistence; the password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Pre-assigned identifier.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Password hash (pre-hashed with Argon2).
    pub password: String,
}

/// Data for partially updating an existing account.
///
/// Only fields that are set will be modified; omitted fields are left
/// unchanged (never nulled).
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    /// New display name.
    pub full_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New profile image URL.
    pub profile_pic: Option<String>,
}

impl AccountUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the profile image URL.
    pub fn with_profile_pic(mut self, profile_pic: impl Into<String>) -> Self {
        self.profile_pic = Some(profile_pic.into());
        self
    }

    /// Check if no fields are set.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.profile_pic.is_none()
    }
}
