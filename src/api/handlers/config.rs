//! Resolved configuration endpoint

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::api::server::AppState;

/// Report the resolved settings to the frontend
///
/// Field names match what the legacy frontend expects.
pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    let settings = &state.settings;
    Json(json!({
        "ip": &settings.bot_host,
        "port": &settings.bot_port,
        "base": settings.base_url(),
        "dashboard_port": settings.dashboard_port,
    }))
}
