//! File discovery for export directories.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename, which fixes the load (and therefore
/// output row) order. Fails when the directory does not exist or contains no
/// CSV files at all.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let read_error = |e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && has_csv_extension(&path) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(IngestError::NoCsvFiles {
            path: dir.to_path_buf(),
        });
    }

    // All paths share the parent, so this orders by filename
    files.sort();
    Ok(files)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
