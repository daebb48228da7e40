//! Output generation for merged transaction data.
//!
//! All formats carry identical logical content, differing only in syntax:
//!
//! - **CSV**: flat columns, header row, one row per record
//! - **JSON**: array of record objects keyed by canonical column name
//! - **XML**: nested element-per-row representation
//! - **SQLite**: rows appended into a named relational table

use std::path::Path;

use anyhow::Result;
use bankmerge_model::UnifiedTable;

mod json;
mod sqlite;
mod tabular;
mod xml;

pub use json::write_json;
pub use sqlite::export_to_sqlite;
pub use tabular::write_csv;
pub use xml::write_xml;

/// File-based output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Xml,
}

impl ExportFormat {
    pub fn all() -> [Self; 3] {
        [Self::Csv, Self::Json, Self::Xml]
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

/// Writes the unified table to `path` in the requested format.
pub fn export(table: &UnifiedTable, format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(path, table),
        ExportFormat::Json => write_json(path, table),
        ExportFormat::Xml => write_xml(path, table),
    }
}
