//! Streaming relay for the live video endpoint
//!
//! Relays the upstream multipart frame stream to the client without buffering.
//! A session moves Connecting -> Streaming -> Closed; a failed connect takes
//! the alternate path and emits exactly one in-band error event instead of an
//! HTTP error status, because the client has already begun a streaming read.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use super::upstream_url;

/// Upstream path handled by the relay. The generic proxy route diverts
/// subpaths with this prefix here; it is a single fixed special case, not a
/// dispatch mechanism.
pub const STREAM_ENDPOINT: &str = "stream_video";

/// Content type assumed when the upstream omits one on the stream.
const DEFAULT_STREAM_CONTENT_TYPE: &str = "multipart/x-mixed-replace;boundary=frame";

/// Backpressure bound between the upstream reader and the client body.
const CHUNK_CHANNEL_CAPACITY: usize = 32;

/// Relays the unbounded video stream from the upstream bot API
pub struct StreamRelay {
    client: reqwest::Client,
    base_url: String,
}

impl StreamRelay {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Open a relay session against the upstream stream endpoint
    ///
    /// No overall timeout: the body is expected to be long-lived. The shared
    /// client's connect timeout covers the connect phase, and a non-success
    /// upstream status is treated the same as a failed connect.
    pub async fn open(&self, raw_query: Option<&str>) -> Response {
        let url = upstream_url(&self.base_url, STREAM_ENDPOINT, raw_query);
        debug!("opening stream relay to {}", url);

        let mut upstream = match self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(upstream) => upstream,
            Err(e) => {
                warn!("stream connect to {} failed: {}", url, e);
                return error_event_response(&e.to_string());
            }
        };

        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_STREAM_CONTENT_TYPE)
            .to_string();

        // Copy loop: upstream chunks are pushed through a bounded channel that
        // backs the client body. The spawned task owns the upstream connection;
        // every exit path drops it, so the socket is released even when the
        // client walks away mid-stream.
        let (tx, rx) = mpsc::channel::<std::io::Result<Bytes>>(CHUNK_CHANNEL_CAPACITY);
        tokio::spawn(async move {
            debug!("stream session to {} established", url);
            loop {
                tokio::select! {
                    chunk = upstream.chunk() => match chunk {
                        Ok(Some(chunk)) => {
                            if chunk.is_empty() {
                                continue;
                            }
                            if tx.send(Ok(chunk)).await.is_err() {
                                debug!("client disconnected, releasing upstream stream");
                                break;
                            }
                        }
                        Ok(None) => {
                            debug!("upstream stream to {} ended", url);
                            break;
                        }
                        Err(e) => {
                            warn!("upstream stream to {} failed: {}", url, e);
                            break;
                        }
                    },
                    _ = tx.closed() => {
                        debug!("client disconnected, releasing upstream stream");
                        break;
                    }
                }
            }
        });

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::CONNECTION, "keep-alive")
            .header("X-Accel-Buffering", "no")
            .body(Body::from_stream(ReceiverStream::new(rx)))
            .unwrap()
    }
}

/// One SSE-formatted error record, then a clean end of stream
fn error_event_response(message: &str) -> Response {
    let event = format!("event: error\ndata: {}\n\n", json!({ "message": message }));
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(event))
        .unwrap()
}
