//! Common error types for the plaques workspace

use thiserror::Error;

/// Common result type for plaques operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the I/O shell around the pipeline
///
/// The pipeline itself is total and never produces these; they cover
/// loading datasets, reading configuration and converting source files.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or GeoJSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed CSV document
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
