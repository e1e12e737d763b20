//! # Error Types
//!
//! This module defines error types used throughout the orderdesk library.
//!
//! The XML serializer is total over [`DocumentValue`](crate::document::DocumentValue)
//! and never produces one of these; they come from configuration, the
//! upstream API, rendering and I/O.

use thiserror::Error;

/// Main error type for orderdesk operations
#[derive(Debug, Error)]
pub enum OrderDeskError {
    /// API configuration is missing or incomplete
    #[error("{0}")]
    Config(String),

    /// Invalid request parameter (empty id, no search criteria, ...)
    #[error("{0}")]
    InvalidRequest(String),

    /// The upstream API answered with a non-success status
    #[error("HTTP {status}: {reason}")]
    Upstream { status: u16, reason: String },

    /// HTTP client error (connect, timeout, body decoding)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// Server startup or runtime error
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for orderdesk operations.
pub type Result<T> = std::result::Result<T, OrderDeskError>;
