//! Error types for benchmark operations

use std::path::PathBuf;
use thiserror::Error;

/// Error type for benchmark operations
#[derive(Debug, Error)]
pub enum SpanbenchError {
    /// Configuration error (bad paths, unknown datasets, invalid sweep definitions)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed input data, with file and optional 1-based line context
    #[error("Invalid data in '{}'{}: {}", .path.display(), fmt_line(.line), .message)]
    Data {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },

    /// JSON deserialization error
    #[error("Failed to parse JSON from '{}': {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// I/O error with the offending path
    #[error("I/O error for path '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Statistical computation error (e.g. too few samples for a stdev)
    #[error("Computation error: {0}")]
    Computation(String),
}

fn fmt_line(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" (line {n})"),
        None => String::new(),
    }
}

/// Result type for benchmark operations
pub type Result<T> = std::result::Result<T, SpanbenchError>;
