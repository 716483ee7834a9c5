// Main entry point for the imgstash-server application.
// Sets up the Tokio runtime, opens the image repository, configures the
// Axum router, and starts the HTTP server.

use clap::Parser;
use imgstash_server::{repository::ImageRepository, shutdown_signal, web};
use std::sync::Arc;
use tracing::Level;

/// Command line arguments for imgstash-server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppConfig {
    /// Hostname/IP to bind the server to.
    /// If this option is specified without value, it will default to "*", meaning the server will listen on all interfaces.
    #[arg(long, env = "IMGSTASH_SERVER_HOST", default_value = "localhost", num_args = 0..=1, default_missing_value = "*")]
    host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "IMGSTASH_SERVER_PORT", default_value_t = 5000)]
    port: u16,

    /// Directory holding the uploads, previews, and the metadata index.
    #[arg(long, env = "IMGSTASH_SERVER_DATA_DIR", default_value = "data")]
    data_dir: String,
}

#[tokio::main]
async fn main() {
    // Parse command line args and environment variables
    let config = AppConfig::parse();

    // Initialize tracing subscriber for structured logging.
    // Logs will go to stdout. Adjust level and format as needed.
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting imgstash-server...");
    tracing::info!("Data directory set to: {}", config.data_dir);

    // --- Open the image repository ---
    // Creates the uploads/, preview/ directories and an empty index on
    // first run. The repository owns all index synchronization.
    let repository = match ImageRepository::open(&config.data_dir) {
        Ok(repository) => Arc::new(repository),
        Err(err) => {
            tracing::error!(
                "FATAL: Failed to open image repository at '{}': {}",
                config.data_dir,
                err
            );
            eprintln!("FATAL: Could not initialize storage. Error: {}. Exiting.", err);
            std::process::exit(1);
        }
    };
    tracing::info!("Image repository initialized.");

    // --- Build Axum Application Router ---
    let app = web::create_app(repository);
    tracing::info!("Axum router configured.");

    // --- Start HTTP Server ---
    let listener = match web::create_listener(&config.host, config.port).await {
        Ok((addr, listener)) => {
            tracing::info!("Server successfully bound. Listening on {}", addr);
            listener
        }
        Err(e) => {
            tracing::error!("FATAL: Failed to bind server: {}", e);
            eprintln!("FATAL: Could not bind server. Error: {}. Exiting.", e);
            std::process::exit(1);
        }
    };

    // Run the server.
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal::shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", e);
        eprintln!("ERROR: Server shut down unexpectedly. Error: {}", e);
    }

    tracing::info!("imgstash-server has shut down.");
}
