//! Dashboard server using Axum
//!
//! One task per connection; the only shared state is the immutable Settings
//! and the pooled upstream client, injected into every handler via AppState.

use std::sync::Arc;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::Settings;
use crate::error::{BotdashError, Result};
use crate::proxy::{build_client, Forwarder, HealthProber, StreamRelay};

use super::routes;

/// Shared state for dashboard handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub forwarder: Arc<Forwarder>,
    pub relay: Arc<StreamRelay>,
    pub prober: Arc<HealthProber>,
}

impl AppState {
    /// Build the state from resolved settings, constructing the shared
    /// upstream client and the proxy components around it.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = build_client()?;
        let base_url = settings.base_url();

        Ok(Self {
            settings: Arc::new(settings),
            forwarder: Arc::new(Forwarder::new(client.clone(), base_url.clone())),
            relay: Arc::new(StreamRelay::new(client.clone(), base_url.clone())),
            prober: Arc::new(HealthProber::new(client, base_url)),
        })
    }
}

/// Dashboard HTTP server
pub struct DashboardServer {
    state: AppState,
}

impl DashboardServer {
    /// Create a new dashboard server from resolved settings
    pub fn new(settings: Settings) -> Result<Self> {
        Ok(Self {
            state: AppState::new(settings)?,
        })
    }

    /// Build the router
    fn build_router(&self) -> Router {
        routes::create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Run the dashboard server until the shutdown signal fires
    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr = self.state.settings.listen_addr();
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(
            "Dashboard listening on {} (upstream: {})",
            addr,
            self.state.settings.base_url()
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.changed().await;
            })
            .await
            .map_err(|e| BotdashError::Internal(e.to_string()))?;

        info!("Dashboard server shut down");
        Ok(())
    }
}
