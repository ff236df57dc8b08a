//! Error types for the Yandex Music client.

use thiserror::Error;

/// Main error type for all Yandex Music operations.
#[derive(Debug, Error)]
pub enum YandexError {
    /// HTTP request failed: connection, timeout or a non-success status.
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    /// The download-info body is not valid XML or lacks a required element.
    #[error("Decode error: {0}")]
    DecodeError(#[from] quick_xml::DeError),

    /// The storage backend answered with a lease we cannot sign.
    ///
    /// This means the backend protocol changed; it is not recoverable.
    #[error("Protocol contract violation: {0}")]
    ContractViolation(String),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The requested record does not exist (HTTP 404 or missing storage id).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API returned an in-band error message.
    #[error("API error: {0}")]
    ApiError(String),

    /// An identifier could not be parsed.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// The proxy URL was rejected.
    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Yandex Music operations.
pub type Result<T> = std::result::Result<T, YandexError>;
