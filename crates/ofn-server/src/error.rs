//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for handlers
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body is not a decodable JSON object
    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// Payload decoded but could not be normalized
    #[error("normalize error: {0}")]
    Normalize(#[from] ofn_common::OfnError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidJson(_) | AppError::Normalize(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        tracing::debug!("Rejected request: {}", message);

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ofn_common::OfnError;

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(AppError::InvalidJson("eof".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(OfnError::UnrecognizedSchema).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_normalize_error_message() {
        let err = AppError::from(OfnError::UnrecognizedSchema);
        assert_eq!(err.to_string(), "normalize error: unknown provider/schema");
    }
}
