//! Account store trait for chirp.
//!
//! The account store is an external collaborator consumed through this
//! narrow interface; the auth service never depends on a concrete backend.

use async_trait::async_trait;
use thiserror::Error;

use super::account::{Account, AccountUpdate, NewAccount};

/// Account store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Unique constraint violation (duplicate email).
    #[error("account with this email already exists")]
    Conflict,

    /// Any other backend failure.
    #[error("store error: {0}")]
    Database(String),
}

/// Durable account records, keyed by email and by identifier.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by email (case-sensitive, as stored).
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Look up an account by identifier.
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, StoreError>;

    /// Persist a new account.
    ///
    /// Email uniqueness is enforced by the store's own constraint; a racing
    /// duplicate insert must surface as [`StoreError::Conflict`].
    async fn insert(&self, new_account: &NewAccount) -> Result<Account, StoreError>;

    /// Apply a partial update to an account.
    ///
    /// Returns the updated account, or `None` if no account has the given
    /// identifier.
    async fn update(&self, id: &str, update: &AccountUpdate)
        -> Result<Option<Account>, StoreError>;
}
