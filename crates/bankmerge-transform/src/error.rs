use bankmerge_model::SourceId;
use thiserror::Error;

/// Errors raised during schema reconciliation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The resolved rule maps nothing for a source that has rows. Merging
    /// would silently discard that source's data, so the run fails instead.
    #[error("rule for source '{source_id}' yields no canonical columns but the source has rows")]
    EmptySchema { source_id: SourceId },
}

pub type Result<T> = std::result::Result<T, TransformError>;
