#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Identifier for one institution's data source.
///
/// Derived from the source file's base name without extension; doubles as the
/// lookup key into the schema map and the value written into the output
/// `source` column.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String")]
pub struct SourceId(String);

impl TryFrom<String> for SourceId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, ModelError> {
        Self::new(value)
    }
}

impl SourceId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidSourceId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
