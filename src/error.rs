//! Error types for the itBit client library.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// The main error type for all itBit client operations.
#[derive(Error, Debug)]
pub enum ItbitError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query string could not be encoded
    #[error("Query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// itBit answered with a non-success status and a structured error body
    #[error("itBit API error (HTTP {status}): {error}")]
    Api {
        /// HTTP status of the response
        status: StatusCode,
        /// Decoded error body
        error: ApiError,
    },

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration is incomplete for the requested operation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required credentials
    #[error("Missing credentials: client key and secret required for signed endpoints")]
    MissingCredentials,
}

impl ItbitError {
    /// Whether the error was raised before any request left the client
    /// because the client is not configured for the call.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ItbitError::MissingCredentials | ItbitError::Config(_) | ItbitError::Url(_)
        )
    }

    /// Whether the error came from the network layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ItbitError::Http(_) | ItbitError::HttpMiddleware(_))
    }

    /// The structured remote error, if itBit rejected the request.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ItbitError::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Error body returned by itBit on a non-success status.
///
/// ```json
/// {"code": 10002, "description": "...", "requestId": "..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    /// Numeric error code
    pub code: i64,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Request identifier assigned by itBit, for support diagnostics
    #[serde(default, rename = "requestId")]
    pub request_id: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} ({})", self.code, self.description, self.request_id)
    }
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: i64, description: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            request_id: request_id.into(),
        }
    }
}
