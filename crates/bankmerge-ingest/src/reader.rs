//! CSV loading into [`SourceTable`]s.
//!
//! Delimiter conventions differ per institution, so the delimiter is sniffed
//! from the header line. Values are kept as text; type coercion is explicitly
//! not a loader concern here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bankmerge_model::{SourceId, SourceTable};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

const DELIMITER_CANDIDATES: [u8; 3] = [b',', b';', b'\t'];

/// Picks the delimiter that occurs most often in the header line.
///
/// Falls back to comma when the line contains none of the candidates.
pub fn detect_delimiter(header_line: &str) -> u8 {
    DELIMITER_CANDIDATES
        .into_iter()
        .max_by_key(|d| header_line.bytes().filter(|b| b == d).count())
        .filter(|d| header_line.bytes().any(|b| b == *d))
        .unwrap_or(b',')
}

/// Derives the source identifier from a file's base name.
pub fn source_id_from_path(path: &Path) -> Result<SourceId> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestError::InvalidFileName {
            path: path.to_path_buf(),
        })?;
    SourceId::new(stem).map_err(|_| IngestError::InvalidFileName {
        path: path.to_path_buf(),
    })
}

/// Reads one CSV file into a [`SourceTable`].
pub fn read_source_table(path: &Path) -> Result<SourceTable> {
    let id = source_id_from_path(path)?;

    let contents = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    // A UTF-8 BOM would otherwise end up inside the first header name
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);
    let delimiter = detect_delimiter(contents.lines().next().unwrap_or(""));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = SourceTable::new(id, headers);
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        table.push_row(record.iter().map(str::to_string).collect());
    }

    debug!(
        source = %table.id,
        columns = table.columns.len(),
        rows = table.rows.len(),
        "loaded source file"
    );
    Ok(table)
}

/// Loads every discovered file, in the given (filename-sorted) order.
///
/// A parse failure in any single file aborts the whole run; results are never
/// built from a silently reduced source set. When `check_shape` is set,
/// sources disagreeing on column count are reported as warnings, never
/// treated as fatal.
pub fn load_source_tables(files: &[PathBuf], check_shape: bool) -> Result<Vec<SourceTable>> {
    let mut seen: BTreeMap<SourceId, PathBuf> = BTreeMap::new();
    let mut tables = Vec::with_capacity(files.len());

    for path in files {
        let table = read_source_table(path)?;
        if let Some(first) = seen.get(&table.id) {
            return Err(IngestError::DuplicateSource {
                id: table.id.to_string(),
                first: first.clone(),
                second: path.clone(),
            });
        }
        seen.insert(table.id.clone(), path.clone());
        tables.push(table);
    }

    if check_shape {
        warn_on_shape_mismatch(&tables);
    }

    Ok(tables)
}

fn warn_on_shape_mismatch(tables: &[SourceTable]) {
    let Some(first) = tables.first() else {
        return;
    };
    for table in &tables[1..] {
        if table.columns.len() != first.columns.len() {
            warn!(
                source = %table.id,
                columns = table.columns.len(),
                reference = %first.id,
                reference_columns = first.columns.len(),
                "source files disagree on column count"
            );
        }
    }
}
