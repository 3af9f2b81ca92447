use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Unified error type for the Botdash application
///
/// Upstream failures on proxied calls are NOT represented here: the proxy layer
/// converts them to structured client responses inline (JSON envelope or an
/// in-band stream event). This enum covers startup and server-side faults.
#[derive(Error, Debug)]
pub enum BotdashError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Botdash operations
pub type Result<T> = std::result::Result<T, BotdashError>;

impl BotdashError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            BotdashError::InvalidConfig(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            BotdashError::Io(_) | BotdashError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Implement IntoResponse for API error responses
impl IntoResponse for BotdashError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_code_mapping() {
        assert_eq!(
            BotdashError::InvalidConfig("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BotdashError::Internal("oops".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BotdashError::Io(std::io::Error::other("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_display_includes_detail() {
        let err = BotdashError::InvalidConfig("cannot read conf.toml".to_string());
        assert!(err.to_string().contains("cannot read conf.toml"));
    }
}
