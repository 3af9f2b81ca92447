//! Proxy layer for the upstream bot API
//!
//! This module provides the outbound half of the dashboard:
//! - Generic request forwarding (GET/POST) with a uniform error envelope
//! - Streaming relay for the long-lived video endpoint
//! - Bounded-timeout health probing

pub mod forward;
pub mod health;
pub mod stream;

#[cfg(test)]
pub(crate) mod testutil;

pub use forward::Forwarder;
pub use health::{HealthProber, HealthReport};
pub use stream::{StreamRelay, STREAM_ENDPOINT};

use std::time::Duration;

use crate::error::{BotdashError, Result};

/// Connect-phase timeout shared by every upstream call, including the
/// streaming relay (which otherwise has no overall deadline).
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared upstream HTTP client
///
/// One client per process; reqwest pools connections internally and is cheap
/// to clone into each component.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| BotdashError::Internal(format!("failed to build HTTP client: {}", e)))
}

/// Join an upstream base URL, a subpath, and an optional raw query string
///
/// The query string is appended verbatim so the upstream sees exactly what the
/// browser sent (no re-encoding).
pub(crate) fn upstream_url(base_url: &str, subpath: &str, raw_query: Option<&str>) -> String {
    let mut url = format!("{}/{}", base_url.trim_end_matches('/'), subpath);
    if let Some(query) = raw_query {
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
    }
    url
}
