//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Opens the record store and the static root
//! - Starts the HTTP server with graceful shutdown support

use std::error::Error;

use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use pc_catalog::config::Config;
use pc_catalog::database::Store;
use pc_catalog::logging::init_logging;
use pc_catalog::route::{create_app, AppState};
use pc_catalog::static_files::StaticFiles;

/// Application entry point
///
/// # Environment Variables
///
/// - `HOST` - Interface to bind (default: 0.0.0.0)
/// - `PORT` - Server port number (default: 4173)
/// - `DATABASE_URL` - Path to the SQLite file (default: "data/pc_catalog.db")
/// - `STATIC_DIR` - Directory served to browsers (default: "public")
/// - `RUST_LOG` - Log filter override
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Reads .env too, so RUST_LOG from that file is visible to the subscriber
    let config = Config::from_env()?;
    init_logging();

    let store = Store::open(&config.database_path)?;
    let assets = StaticFiles::new(&config.static_dir).map_err(|err| {
        format!(
            "failed to open static directory {}: {err}",
            config.static_dir.display()
        )
    })?;

    let app = create_app(AppState::new(store, assets)).layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running at http://{}", addr);
    info!("Using database: {}", config.database_path.display());
    info!("Serving static files from: {}", config.static_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when SIGINT (Ctrl+C) or, on Unix, SIGTERM arrives
///
/// In-flight requests are allowed to finish before the server exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}
