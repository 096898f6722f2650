//! Web server for chirp.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::db::Database;
use crate::{ChirpError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the API.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server from configuration and a connected database.
    pub fn new(config: &Config, db: &Database) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| ChirpError::Config(format!("invalid server address: {e}")))?;

        let app_state = Arc::new(AppState::new(config, db)?);

        Ok(Self {
            addr,
            app_state,
            cors_origins: config.server.cors_origins.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the server until shutdown.
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.app_state, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        info!("Web API listening on {}", self.addr);

        axum::serve(listener, router)
            .await
            .map_err(ChirpError::Io)?;

        Ok(())
    }
}
