//! Source-file ingestion for bank transaction merging.
//!
//! Discovers CSV exports in a directory and loads each into a
//! [`bankmerge_model::SourceTable`], deriving source identifiers from file
//! base names.
//!
//! # Error policy
//!
//! Discovery failures and per-file parse failures both abort the run: a merge
//! over a silently reduced source set is worse than no merge. Duplicate
//! source identifiers are rejected for the same reason.

mod discovery;
mod error;
mod reader;

pub use discovery::list_csv_files;
pub use error::{IngestError, Result};
pub use reader::{detect_delimiter, load_source_tables, read_source_table, source_id_from_path};
