//! Test helpers: real ephemeral-port upstreams for exercising the proxy layer.

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A mock upstream bot API bound to an ephemeral local port.
pub struct MockUpstream {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    /// Serve the given router on an ephemeral port.
    pub async fn spawn(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a port nothing is listening on (connection refused).
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Read an axum response body to completion.
pub async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}
