use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::Value;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Invalid caller input, rejected before any upstream call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or mismatched webhook credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Upstream call failed; `details` carries the gateway's error body
    #[error("{context}")]
    Upstream { context: String, details: Value },

    /// Upstream answered with a shape we could not decode
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Local payload encoding failure (never a network error)
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let mut body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        });

        if let AppError::Upstream { details, .. } = self {
            body["details"] = details.clone();
        }

        HttpResponse::build(status_code).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn gateway(msg: impl Into<String>) -> Self {
        AppError::Gateway(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn upstream(context: impl Into<String>, details: Value) -> Self {
        AppError::Upstream {
            context: context.into(),
            details,
        }
    }

    /// Re-label an upstream failure for the caller, keeping its details
    pub fn into_upstream(self, context: impl Into<String>) -> Self {
        match self {
            AppError::Upstream { details, .. } => AppError::upstream(context, details),
            AppError::Gateway(msg) => AppError::upstream(context, Value::String(msg)),
            AppError::HttpClient(e) => AppError::upstream(context, Value::String(e.to_string())),
            other => other,
        }
    }
}
