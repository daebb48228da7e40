use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid source identifier: {0:?}")]
    InvalidSourceId(String),
    #[error("schema map has no \"{0}\" entry")]
    MissingDefaultRule(&'static str),
    #[error("canonical column name \"{0}\" is reserved")]
    ReservedColumn(&'static str),
}

pub type Result<T> = std::result::Result<T, ModelError>;
