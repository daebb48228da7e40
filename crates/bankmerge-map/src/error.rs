use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving a schema-map document.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read schema map {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write schema map {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema map is not a well-formed JSON object: {message}")]
    Parse { message: String },

    #[error("schema map has no \"default\" entry")]
    MissingDefault,

    #[error("invalid rule for \"{entry}\": {reason}")]
    InvalidRule { entry: String, reason: String },
}

pub type Result<T> = std::result::Result<T, MapError>;
