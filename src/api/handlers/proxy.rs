//! Proxy endpoints
//!
//! Thin handlers delegating to the proxy layer. The streaming endpoint is a
//! single fixed special case inside the generic GET route.

use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;
use bytes::Bytes;

use crate::api::server::AppState;
use crate::proxy::STREAM_ENDPOINT;

/// Forward a GET request to the upstream bot API
pub async fn proxy_get(
    State(state): State<AppState>,
    Path(subpath): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    if subpath.starts_with(STREAM_ENDPOINT) {
        return state.relay.open(query.as_deref()).await;
    }
    state.forwarder.forward_get(&subpath, query.as_deref()).await
}

/// Forward a POST request, passing the body through untouched
pub async fn proxy_post(
    State(state): State<AppState>,
    Path(subpath): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    state
        .forwarder
        .forward_post(&subpath, query.as_deref(), body, content_type)
        .await
}
