//! Session token issuance and verification for chirp.
//!
//! Session tokens are HS256 JWTs binding an account identifier to a
//! 7-day validity window, signed with the process-wide secret.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ChirpError, Result};

/// Session token validity window: 7 days.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Token verification errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token's validity window has passed.
    #[error("session token expired")]
    Expired,

    /// The signature does not verify against the current secret.
    #[error("invalid session token signature")]
    InvalidSignature,

    /// The token cannot be parsed at all.
    #[error("malformed session token")]
    Malformed,
}

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the account identifier.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Issues and verifies signed session tokens.
///
/// Holds the process-wide signing secret, read-only after startup, so it is
/// safe to share across requests behind an `Arc`.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Create a token issuer from the signing secret.
    ///
    /// An empty secret is a fatal misconfiguration; callers must treat this
    /// error as startup-fatal, never as a per-request condition.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(ChirpError::Config(
                "token signing secret is empty".to_string(),
            ));
        }

        let mut validation = Validation::default();
        validation.validate_exp = true;
        // Expiry boundary is exact: no clock-skew grace
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a session token for an account, valid for 7 days from now.
    pub fn issue(&self, account_id: &str) -> std::result::Result<String, TokenError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Issue a session token with an explicit issuance instant.
    ///
    /// Expiry behavior is tested through this entry point with fixed
    /// instants instead of sleeping.
    pub fn issue_at(
        &self,
        account_id: &str,
        issued_at: DateTime<Utc>,
    ) -> std::result::Result<String, TokenError> {
        let claims = SessionClaims {
            sub: account_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| TokenError::Malformed)
    }

    /// Verify a session token and recover the account identifier.
    pub fn verify(&self, token: &str) -> std::result::Result<String, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            },
        )?;

        Ok(data.claims.sub)
    }
}
