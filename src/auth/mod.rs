//! Authentication module for chirp.
//!
//! Provides password hashing, session token issuance, the session cookie
//! policy, and the authentication service orchestrating them.

mod cookie;
mod password;
mod service;
mod token;

pub use cookie::{clear_cookie, session_cookie, SESSION_COOKIE};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::{
    AuthError, AuthService, AuthSession, ProfileUpdateInput, SignupInput, MIN_PASSWORD_LENGTH,
};
pub use token::{SessionClaims, TokenError, TokenIssuer, SESSION_TTL_DAYS};
