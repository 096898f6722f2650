//! Handlers for the Web API.

pub mod auth;

pub use auth::{check, login, logout, signup, update_profile, AppState};
