//! Error types for source-file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering and loading source files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory contains no CSV files to merge.
    #[error("no CSV files found in {path}")]
    NoCsvFiles { path: PathBuf },

    /// Two files resolve to the same source identifier.
    #[error("duplicate source identifier '{id}' (from {first} and {second})")]
    DuplicateSource {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// File name does not yield a usable source identifier.
    #[error("cannot derive a source identifier from {path}")]
    InvalidFileName { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a CSV file. Aborts the whole run; see crate docs.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_path() {
        let err = IngestError::NoCsvFiles {
            path: PathBuf::from("/data/exports"),
        };
        assert_eq!(err.to_string(), "no CSV files found in /data/exports");
    }
}
