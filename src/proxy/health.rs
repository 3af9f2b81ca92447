//! Upstream health probing
//!
//! A single bounded-timeout GET against the upstream status endpoint. Failure
//! is data, not an error: the prober never propagates a transport fault.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

/// Upstream endpoint used as the liveness signal.
const PROBE_ENDPOINT: &str = "game_state";

/// Timeout for a single probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Binary health report for the dashboard frontend
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    pub upstream: String,
}

/// Probes the upstream bot API for liveness
pub struct HealthProber {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HealthProber {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url,
            timeout: PROBE_TIMEOUT,
        }
    }

    /// Override the probe timeout (used by tests).
    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Probe the upstream once; `ok` iff it answers with a success status in time
    pub async fn probe(&self) -> HealthReport {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), PROBE_ENDPOINT);

        let ok = match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("health probe to {} failed: {}", url, e);
                false
            }
        };

        HealthReport {
            ok,
            upstream: self.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::build_client;
    use crate::proxy::testutil::{dead_base_url, MockUpstream};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    fn prober(base_url: String) -> HealthProber {
        HealthProber::new(build_client().unwrap(), base_url)
    }

    #[tokio::test]
    async fn test_probe_ok_on_success_status() {
        let router = Router::new().route("/game_state", get(|| async { "{}" }));
        let upstream = MockUpstream::spawn(router).await;

        let report = prober(upstream.base_url.clone()).probe().await;
        assert!(report.ok);
        assert_eq!(report.upstream, upstream.base_url);
    }

    #[tokio::test]
    async fn test_probe_not_ok_on_error_status() {
        let router = Router::new().route(
            "/game_state",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
        );
        let upstream = MockUpstream::spawn(router).await;

        let report = prober(upstream.base_url.clone()).probe().await;
        assert!(!report.ok);
    }

    #[tokio::test]
    async fn test_probe_not_ok_on_unreachable_upstream() {
        let base = dead_base_url().await;
        let report = prober(base.clone()).probe().await;
        assert!(!report.ok);
        assert_eq!(report.upstream, base);
    }

    #[tokio::test]
    async fn test_probe_not_ok_on_timeout() {
        let router = Router::new().route(
            "/game_state",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "{}"
            }),
        );
        let upstream = MockUpstream::spawn(router).await;

        let report = prober(upstream.base_url.clone())
            .with_timeout(Duration::from_millis(100))
            .probe()
            .await;
        assert!(!report.ok);
    }
}
