//! # API Error Types
//!
//! Typed error handling for the labreport backend.
//! All fallible operations return `Result<T, ApiError>`.

use thiserror::Error;

/// Core error type for all backend operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration errors (missing env vars, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A required request field was not supplied
    #[error("Missing required field: {name}")]
    MissingField { name: String },

    /// Uploaded file has an extension outside the accepted set
    #[error("Unsupported file type: {extension} (only PDF/PNG/JPG allowed)")]
    UnsupportedFileType { extension: String },

    /// Uploaded file exceeds the configured size cap
    #[error("File too large (max {max_bytes} bytes)")]
    PayloadTooLarge { max_bytes: usize },

    /// Webhook payload parsing error
    #[error("Webhook parse error: {0}")]
    WebhookParse(String),

    /// Filesystem error in the report store
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Configuration(_) => 500,
            ApiError::InvalidRequest(_) => 400,
            ApiError::MissingField { .. } => 400,
            ApiError::UnsupportedFileType { .. } => 400,
            ApiError::PayloadTooLarge { .. } => 413,
            ApiError::WebhookParse(_) => 400,
            ApiError::Storage(_) => 500,
            ApiError::Internal(_) => 500,
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// Result type alias for backend operations
pub type ApiResult<T> = Result<T, ApiError>;
