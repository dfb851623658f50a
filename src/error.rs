//! Error types for the device catalog client
//!
//! This module provides the error hierarchy for everything the client can
//! fail at, following Rust idioms with the `thiserror` crate.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the device catalog client.
///
/// This enum represents all possible errors that can occur when talking to
/// the service, from transport faults to typed API errors.
#[derive(Debug, Error)]
pub enum Error {
    /// API returned a bad request error (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error (500+).
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    /// Generic API error for status codes not covered above.
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Failed to deserialize an API response.
    #[error("Failed to parse API response: {0}")]
    ResponseValidation(String),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an API error from an HTTP response status and body.
    ///
    /// The service reports failures as `{"error": "..."}` payloads; anything
    /// else falls back to the raw body text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .map(|parsed| parsed.error)
            .unwrap_or_else(|_| body.to_string());

        match status {
            400 => Error::BadRequest(message),
            404 => Error::NotFound(message),
            s if s >= 500 => Error::InternalServerError(message),
            _ => Error::ApiError { status, message },
        }
    }

    /// HTTP status code carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest(_) => Some(400),
            Error::NotFound(_) => Some(404),
            Error::InternalServerError(_) => Some(500),
            Error::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check whether this error is a missing-resource response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

// Error payload shape used by the service

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    error: String,
}
