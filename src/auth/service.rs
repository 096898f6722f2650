//! Authentication service for chirp.
//!
//! Orchestrates signup, login, profile update, and session checks over the
//! account store, password hasher, token issuer, and image store. All
//! collaborators are injected at construction so tests can run with fixed
//! secrets and in-memory stores.
//!
//! Logout carries no server-side state here: there is no revocation list,
//! so logging out is purely the transport layer overwriting the session
//! cookie (see [`crate::auth::clear_cookie`]).

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenIssuer;
use crate::db::{new_account_id, Account, AccountStore, AccountUpdate, NewAccount, StoreError};
use crate::media::ImageStore;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication and account mutation errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Client input is malformed.
    #[error("{0}")]
    Validation(String),

    /// An account with this email already exists.
    #[error("Email already exists")]
    DuplicateAccount,

    /// Wrong email or wrong password.
    ///
    /// Deliberately a single message for both paths so the response does
    /// not reveal whether an email is registered.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account not found.
    #[error("Account not found")]
    NotFound,

    /// No valid session was established upstream.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// The image store collaborator failed.
    #[error("image upload failed: {0}")]
    Upstream(String),

    /// Unexpected store or hashing failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict => AuthError::DuplicateAccount,
            StoreError::Database(msg) => AuthError::Internal(msg),
        }
    }
}

/// Signup input.
#[derive(Debug, Clone)]
pub struct SignupInput {
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password (hashed before it leaves this module).
    pub password: String,
}

/// Profile update input. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdateInput {
    /// New display name.
    pub full_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// Raw profile image input (data URL), exchanged for a durable URL
    /// via the image store.
    pub profile_pic: Option<String>,
}

/// A freshly authenticated account together with its session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The account, as persisted.
    pub account: Account,
    /// Signed session token bound to the account identifier.
    pub token: String,
}

/// Authentication service.
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    images: Arc<dyn ImageStore>,
    issuer: Arc<TokenIssuer>,
}

impl AuthService {
    /// Create an authentication service over the given collaborators.
    pub fn new(
        store: Arc<dyn AccountStore>,
        images: Arc<dyn ImageStore>,
        issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            store,
            images,
            issuer,
        }
    }

    /// Register a new account and establish a session for it.
    ///
    /// The account is persisted before a token is issued, so a returned
    /// session always refers to a durable account.
    pub async fn signup(&self, input: SignupInput) -> Result<AuthSession, AuthError> {
        if input.full_name.is_empty() || input.email.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("All fields are required".to_string()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        if self.store.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = hash_password(&input.password).map_err(|e| {
            warn!("Password hashing failed during signup: {e}");
            AuthError::Internal(e.to_string())
        })?;

        let new_account = NewAccount {
            id: new_account_id(),
            full_name: input.full_name,
            email: input.email,
            password: password_hash,
        };

        // A concurrent signup for the same email is not serialized here;
        // the store's unique constraint resolves the race as a Conflict.
        let account = self.store.insert(&new_account).await?;

        let token = self
            .issuer
            .issue(&account.id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!(account_id = %account.id, "Account created");

        Ok(AuthSession { account, token })
    }

    /// Authenticate an existing account and establish a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        // Unknown email and wrong password take the same exit; the error
        // must not reveal whether the email is registered.
        let account = match self.store.find_by_email(email).await? {
            Some(account) => account,
            None => {
                warn!("Login failed: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if verify_password(password, &account.password).is_err() {
            warn!(account_id = %account.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .issuer
            .issue(&account.id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!(account_id = %account.id, "Login successful");

        Ok(AuthSession { account, token })
    }

    /// Apply a partial profile update to an authenticated account.
    ///
    /// A supplied image input is exchanged with the image store for a
    /// durable URL first; if that exchange fails the whole update fails,
    /// never silently keeping the old image.
    pub async fn update_profile(
        &self,
        account_id: &str,
        input: ProfileUpdateInput,
    ) -> Result<Account, AuthError> {
        if input.full_name.is_none() && input.email.is_none() && input.profile_pic.is_none() {
            return Err(AuthError::Validation("All fields are empty".to_string()));
        }

        if self.store.find_by_id(account_id).await?.is_none() {
            return Err(AuthError::NotFound);
        }

        let mut update = AccountUpdate {
            full_name: input.full_name,
            email: input.email,
            profile_pic: None,
        };

        if let Some(ref image) = input.profile_pic {
            let url = self.images.upload(image).await.map_err(|e| {
                warn!(account_id = %account_id, "Profile image upload failed: {e}");
                AuthError::Upstream(e.to_string())
            })?;
            update.profile_pic = Some(url);
        }

        let account = self
            .store
            .update(account_id, &update)
            .await?
            .ok_or(AuthError::NotFound)?;

        info!(account_id = %account.id, "Profile updated");

        Ok(account)
    }

    /// Return the account for an already-authenticated identifier.
    pub async fn check_auth(&self, account_id: &str) -> Result<Account, AuthError> {
        self.store
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::NotFound)
    }
}
