//! Data model for merging heterogeneous bank transaction exports.
//!
//! Leaf crate shared by ingestion, mapping, reconciliation and output:
//! source/unified table representations, column rules and the schema map.

pub mod error;
pub mod ids;
pub mod rule;
pub mod table;

pub use error::{ModelError, Result};
pub use ids::SourceId;
pub use rule::{ColumnRule, DEFAULT_RULE_KEY, SchemaMap};
pub use table::{CellValue, SOURCE_COLUMN, SourceTable, UnifiedTable};
