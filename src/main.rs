use tracing::{error, info};

use chirp::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration (config.toml is optional; the environment wins)
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    chirp::logging::init(&config.logging);

    // A missing signing secret is fatal at startup, never per-request
    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(1);
    }

    info!("chirp - account and session service");

    let db = match Database::connect(&config.database.url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config, &db) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to initialize server: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "Server configured on {}:{} ({:?})",
        config.server.host, config.server.port, config.environment
    );

    if let Err(e) = server.run().await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
