//! chirp - Account and session service for a realtime chat backend.
//!
//! Handles account creation, password verification, signed session-token
//! issuance via a cookie, and session-guarded profile mutation.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod media;
pub mod web;

pub use auth::{
    clear_cookie, hash_password, session_cookie, verify_password, AuthError, AuthService,
    AuthSession, PasswordError, ProfileUpdateInput, SessionClaims, SignupInput, TokenError,
    TokenIssuer, MIN_PASSWORD_LENGTH, SESSION_COOKIE, SESSION_TTL_DAYS,
};
pub use config::Config;
pub use db::{Account, AccountRepository, AccountStore, AccountUpdate, Database, NewAccount};
pub use error::{ChirpError, Result};
pub use media::{DisabledImageStore, HttpImageStore, ImageStore, ImageStoreError};
pub use web::{AppState, WebServer};
