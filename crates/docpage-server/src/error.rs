//! Server startup and request errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Host and port don't form a socket address.
    #[error("Invalid address {address}: {source}")]
    Address {
        /// The `host:port` string.
        address: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },

    /// I/O error while binding or serving.
    #[error("Server I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Page view could not be serialized.
    #[error("Cannot encode response: {0}")]
    Json(#[from] serde_json::Error),

    /// A page load task panicked or was cancelled.
    #[error("Page task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        let body = json!({"error": self.to_string()});
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
