//! Error types for kafka-fetch
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FetchError
pub type Result<T> = std::result::Result<T, FetchError>;

/// Unified error type for kafka-fetch operations
#[derive(Debug, Error)]
pub enum FetchError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    /// Invalid input to request construction (oversized topic, bad max size)
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The outer response length prefix is missing or inconsistent
    #[error("Framing error: {0}")]
    Framing(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    /// Surfaced from the transport
    #[error("Connection error: {0}")]
    Connection(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Wrap a transport I/O failure with context
    pub(crate) fn connection(context: &str, err: std::io::Error) -> Self {
        FetchError::Connection(format!("{}: {}", context, err))
    }
}
