//! Error types for the upload sink.
//!
//! Every handler error becomes a JSON body with a matching status code,
//! so the widget's fail path sees a real server answer.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::api::types::error_response;

#[derive(Debug, Error)]
pub enum SinkError {
    /// Malformed or truncated multipart body.
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// No part with the configured file field.
    #[error("No file provided in field '{0}'")]
    MissingFile(String),

    /// File above the configured limit.
    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    /// Binding or serving failed.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SinkError {
    pub fn status(&self) -> StatusCode {
        match self {
            SinkError::Multipart(e) => e.status(),
            SinkError::MissingFile(_) => StatusCode::BAD_REQUEST,
            SinkError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            SinkError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SinkError {
    fn into_response(self) -> Response {
        let status = self.status();
        eprintln!("❌ {} ({})", self, status);
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SinkError::MissingFile("file".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SinkError::TooLarge { size: 10, limit: 4 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_too_large_message() {
        let msg = SinkError::TooLarge { size: 10, limit: 4 }.to_string();
        assert!(msg.contains("10 bytes"));
        assert!(msg.contains("limit 4"));
    }
}
