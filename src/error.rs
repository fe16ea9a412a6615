//! Error types for exposure-api-client.
//!
//! Errors surface only while configuring a [`Dispatcher`](crate::Dispatcher)
//! or when decoding a response body on the caller side. Anything that goes
//! wrong during a dispatch is folded into a
//! [`DispatchOutcome`](crate::DispatchOutcome) instead.

use thiserror::Error;

/// Main error type for all client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error reported by reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base endpoint is not an absolute URL.
    #[error("Invalid base endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The base endpoint parsed but is not an http(s) URL.
    #[error("Unsupported base endpoint: {0}")]
    UnsupportedEndpoint(String),

    /// Action path was empty.
    #[error("Action path must not be empty")]
    EmptyAction,

    /// A required builder field was not set.
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    /// No tokio runtime was supplied and none is running.
    #[error("No async runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// Transport-level failure raised by a custom transport.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias using ApiError.
pub type Result<T> = std::result::Result<T, ApiError>;
