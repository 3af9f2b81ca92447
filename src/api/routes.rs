//! Dashboard route definitions

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use super::handlers;
use super::server::AppState;

/// Create the dashboard router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/config", get(handlers::config::get_config))
        .route("/health", get(handlers::health::health))
        .route("/proxy/*subpath", get(handlers::proxy::proxy_get))
        .route("/proxy_post/*subpath", post(handlers::proxy::proxy_post))
        // Landing page and assets; not a design focus
        .route_service("/", ServeFile::new("static/index.html"))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let settings = Settings {
            bot_host: "192.168.7.2".to_string(),
            bot_port: "8765".to_string(),
            dashboard_host: "127.0.0.1".to_string(),
            dashboard_port: 8080,
            debug: false,
        };
        AppState::new(settings).unwrap()
    }

    #[tokio::test]
    async fn test_config_route_reports_settings() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/config")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["ip"], "192.168.7.2");
        assert_eq!(parsed["port"], "8765");
        assert_eq!(parsed["base"], "http://192.168.7.2:8765");
        assert_eq!(parsed["dashboard_port"], 8080);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
