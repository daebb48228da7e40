#![deny(unsafe_code)]

use crate::SourceId;

/// Name of the reserved column that tags every unified row with its origin.
pub const SOURCE_COLUMN: &str = "source";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// One loaded source file, tagged with its identifier.
///
/// Rows hold values as loaded; no type coercion happens downstream.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceTable {
    pub id: SourceId,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn new(id: SourceId, columns: Vec<String>) -> Self {
        Self {
            id,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The merged result: canonical columns plus the trailing `source` column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnifiedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl UnifiedTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_index_matches_exact_name() {
        let table = SourceTable::new(
            SourceId::new("bankA").unwrap(),
            vec!["date".to_string(), "amt".to_string()],
        );
        assert_eq!(table.column_index("amt"), Some(1));
        assert_eq!(table.column_index("Amt"), None);
    }

    #[test]
    fn cell_value_serializes_tagged() {
        let json = serde_json::to_string(&CellValue::Missing).unwrap();
        let round: CellValue = serde_json::from_str(&json).unwrap();
        assert!(round.is_missing());
    }
}
