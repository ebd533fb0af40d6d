use tracing::info;

use strongbox::{Config, Database, WebServer};

#[tokio::main]
async fn main() -> strongbox::Result<()> {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = strongbox::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        strongbox::logging::init_console_only(&config.logging.level);
    }

    info!("strongbox - personal file vault");

    let db = Database::open(&config.database.path).await?;

    let server = WebServer::new(&config, db)?;
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    server.run().await
}
