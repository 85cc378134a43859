//! Error types for catalog ingestion and configuration.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading the catalog or configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem error while reading a catalog or config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV that the reader could not recover from
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file problem
    #[error("Configuration error: {0}")]
    Config(String),
}
