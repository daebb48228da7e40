//! Hierarchical-text (JSON) output.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use bankmerge_model::{CellValue, UnifiedTable};
use serde_json::{Map, Value};

/// Writes the unified table as a JSON array of record objects keyed by
/// canonical column name. Missing cells become `null`.
pub fn write_json(path: &Path, table: &UnifiedTable) -> Result<()> {
    let records: Vec<Value> = table.rows.iter().map(|row| record(table, row)).collect();

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &records).context("write JSON output")?;
    Ok(())
}

fn record(table: &UnifiedTable, row: &[CellValue]) -> Value {
    let mut object = Map::new();
    for (column, cell) in table.columns.iter().zip(row) {
        let value = match cell {
            CellValue::Text(text) => Value::String(text.clone()),
            CellValue::Missing => Value::Null,
        };
        object.insert(column.clone(), value);
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_cells_are_null() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merged.json");

        let mut table =
            UnifiedTable::new(vec!["date".into(), "amount".into(), "source".into()]);
        table.push_row(vec![
            CellValue::text("2024-01-02"),
            CellValue::Missing,
            CellValue::text("bankA"),
        ]);
        write_json(&path, &table).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed[0]["date"], "2024-01-02");
        assert_eq!(parsed[0]["amount"], Value::Null);
        assert_eq!(parsed[0]["source"], "bankA");
    }
}
