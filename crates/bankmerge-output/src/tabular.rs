//! Tabular-text (CSV) output.

use std::path::Path;

use anyhow::{Context, Result};
use bankmerge_model::UnifiedTable;
use csv::WriterBuilder;

/// Writes the unified table as CSV: header row, then one record per row, all
/// columns in established order, `source` included. Missing cells become
/// empty fields.
pub fn write_csv(path: &Path, table: &UnifiedTable) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;

    writer
        .write_record(&table.columns)
        .context("write CSV header")?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.as_text().unwrap_or("")))
            .context("write CSV record")?;
    }
    writer.flush().context("flush CSV output")?;
    Ok(())
}
