//! Relational sink (SQLite via rusqlite).

use std::path::Path;

use anyhow::{Context, Result, bail};
use bankmerge_model::{CellValue, UnifiedTable};
use rusqlite::{Connection, params_from_iter, types::Value as SqlValue};
use tracing::info;

/// Writes the unified table into a named SQLite table.
///
/// Creates the table when absent (every column TEXT); when it already exists,
/// rows are **appended** and existing data is never replaced. Missing cells
/// become SQL `NULL`.
pub fn export_to_sqlite(db_path: &Path, table_name: &str, table: &UnifiedTable) -> Result<()> {
    if table.columns.is_empty() {
        bail!("cannot export a table with no columns");
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("open SQLite database {}", db_path.display()))?;

    let column_defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} TEXT", quote_ident(c)))
        .collect();
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(table_name),
            column_defs.join(", ")
        ),
        [],
    )
    .with_context(|| format!("create table {table_name}"))?;

    let placeholders = vec!["?"; table.columns.len()].join(", ");
    let insert_sql = format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        quote_ident(table_name),
        table
            .columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let tx = conn.unchecked_transaction().context("begin transaction")?;
    {
        let mut stmt = tx.prepare(&insert_sql).context("prepare insert")?;
        for row in &table.rows {
            let values = row.iter().map(|cell| match cell {
                CellValue::Text(text) => SqlValue::Text(text.clone()),
                CellValue::Missing => SqlValue::Null,
            });
            stmt.execute(params_from_iter(values))
                .with_context(|| format!("insert into {table_name}"))?;
        }
    }
    tx.commit().context("commit transaction")?;

    info!(
        table = table_name,
        rows = table.rows.len(),
        db = %db_path.display(),
        "appended rows to SQLite table"
    );
    Ok(())
}

/// Double-quote an identifier for SQLite, escaping embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
