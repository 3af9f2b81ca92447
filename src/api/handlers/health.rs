//! Health check endpoint

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::server::AppState;

/// Probe the upstream bot API and report binary health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.prober.probe().await)
}
