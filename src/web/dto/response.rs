//! Response DTOs for the Web API.

use serde::Serialize;

use crate::db::Account;

/// Public view of an account.
///
/// The only account shape that ever leaves the service; the password hash
/// has no representation here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account identifier.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Profile image URL, empty string when unset.
    pub profile_pic: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            full_name: account.full_name,
            email: account.email,
            profile_pic: account.profile_pic,
        }
    }
}

/// Simple message response (logout).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
