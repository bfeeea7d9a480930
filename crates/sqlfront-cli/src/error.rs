//! Error types for the command-line front-end.

use std::path::PathBuf;

/// Errors that can occur while reading, parsing or printing SQL.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Standard input could not be read.
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    /// A statement could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// At least one statement failed to parse.
    #[error("{count} statement(s) failed to parse")]
    Syntax {
        /// Number of diagnostics reported.
        count: usize,
    },
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
