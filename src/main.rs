//! Botdash - Entry Point
//!
//! Resolves settings, starts the dashboard server, and handles graceful shutdown.

use tokio::signal;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod proxy;

use api::DashboardServer;
use config::Settings;

/// Config file expected next to the binary's working directory.
const CONFIG_FILE: &str = "conf.toml";

#[tokio::main]
async fn main() -> error::Result<()> {
    // Initialize tracing; DEBUG=true raises the default level before the
    // config file is even read, matching the dev-mode toggle.
    let debug = std::env::var("DEBUG")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);
    let default_filter = if debug {
        "botdash=debug,tower_http=debug"
    } else {
        "botdash=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Botdash");

    // Load configuration; a missing or broken config file aborts startup.
    let settings = Settings::load(CONFIG_FILE)?;
    info!(
        "Configuration loaded (upstream: {}, listen: {})",
        settings.base_url(),
        settings.listen_addr()
    );

    let server = DashboardServer::new(settings)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let server_task = tokio::spawn(async move { server.run(shutdown_rx).await });

    // Wait for shutdown signal
    shutdown_signal().await;
    info!("Shutdown signal received");

    let _ = shutdown_tx.send(true);
    match server_task.await {
        Ok(result) => result?,
        Err(e) => return Err(error::BotdashError::Internal(e.to_string())),
    }

    info!("Botdash stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
