//! Error types for the WoundScribe library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for WoundScribe operations.
#[derive(Debug, Error)]
pub enum WoundscribeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted registry exists but is not well-formed.
    #[error("Registry '{path}' is corrupt: {message}")]
    RegistryCorrupt { path: PathBuf, message: String },

    /// Saving the registry failed. In-memory state is untouched.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Error reading or writing a PDF.
    #[error("PDF error for '{path}': {message}")]
    Pdf { path: PathBuf, message: String },

    /// A page selection that cannot be sliced (empty or out of range).
    #[error("Invalid page selection: {0}")]
    InvalidPageSelection(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The operator stopped a review before the batch finished.
    #[error("Review halted by operator")]
    Halted,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for WoundScribe operations.
pub type Result<T> = std::result::Result<T, WoundscribeError>;
