//! Web API module for chirp.
//!
//! Provides the REST surface for account and session operations, consumed
//! by the chat frontend alongside the realtime message transport (which
//! lives elsewhere).

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
