//! Generic proxy forwarder
//!
//! Relays a single inbound request to the upstream bot API and relays the
//! upstream status, body, and content-type back verbatim. Upstream transport
//! failures become a structured 502 envelope, never a raw error.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde_json::json;
use tracing::{debug, warn};

use super::upstream_url;

/// Total timeout for a simple proxied call.
const FORWARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Content type assumed when the client or the upstream omits one.
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Forwards individual requests to the upstream bot API
///
/// Single attempt per call, no retries; a visible 502 envelope beats a silent
/// retry loop for an interactive dashboard.
pub struct Forwarder {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url,
            timeout: FORWARD_TIMEOUT,
        }
    }

    /// Override the per-request timeout (used by tests).
    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Forward a GET request to `{base}/{subpath}?{raw_query}`
    pub async fn forward_get(&self, subpath: &str, raw_query: Option<&str>) -> Response {
        let url = upstream_url(&self.base_url, subpath, raw_query);
        debug!("forwarding GET to {}", url);

        let result = self.client.get(&url).timeout(self.timeout).send().await;
        self.relay(result, &url).await
    }

    /// Forward a POST request, passing the inbound body through as raw bytes
    ///
    /// The body is never deserialized: re-encoding through a generic JSON value
    /// would turn an empty array into an empty object, and the upstream treats
    /// those differently.
    pub async fn forward_post(
        &self,
        subpath: &str,
        raw_query: Option<&str>,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Response {
        let url = upstream_url(&self.base_url, subpath, raw_query);
        debug!("forwarding POST to {} ({} bytes)", url, body.len());

        let result = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header(
                header::CONTENT_TYPE,
                content_type.unwrap_or(DEFAULT_CONTENT_TYPE),
            )
            .body(body)
            .send()
            .await;
        self.relay(result, &url).await
    }

    /// Turn an upstream result into the relayed client response
    async fn relay(&self, result: reqwest::Result<reqwest::Response>, url: &str) -> Response {
        let upstream = match result {
            Ok(upstream) => upstream,
            Err(e) => return gateway_error(&e.to_string(), url),
        };

        let status = StatusCode::from_u16(upstream.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        // The simple proxy path buffers the whole body; streaming is the
        // relay's job.
        let body = match upstream.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return gateway_error(&e.to_string(), url),
        };

        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "no-cache")
            .body(Body::from(body))
            .unwrap()
    }
}

/// Uniform error envelope for unreachable or timed-out upstream calls
fn gateway_error(message: &str, url: &str) -> Response {
    warn!("upstream call to {} failed: {}", url, message);
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({
            "error": message,
            "upstream": url,
        })),
    )
        .into_response()
}
