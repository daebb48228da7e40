//! Merge pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Discover**: list CSV exports in the input directory
//! 2. **Load**: read each file into a source table
//! 3. **Map**: load the schema-map document (or the built-in rules)
//! 4. **Reconcile**: merge sources into one unified table
//! 5. **Export**: write the requested output artifacts
//!
//! Discovery, configuration and load failures abort the run; every error
//! names the source or path and the stage that raised it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use bankmerge_ingest::{list_csv_files, load_source_tables};
use bankmerge_map::{builtin_schema_map, load_schema_map, write_schema_map};
use bankmerge_model::{SchemaMap, UnifiedTable};
use bankmerge_output::{ExportFormat, export, export_to_sqlite};
use bankmerge_transform::reconcile;

/// Everything a merge run needs, threaded explicitly rather than read from
/// ambient state.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub input_dir: PathBuf,
    pub schema_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub name: String,
    pub formats: Vec<ExportFormat>,
    pub sqlite: Option<SqliteTarget>,
    pub dry_run: bool,
    pub export_schema: Option<PathBuf>,
    pub check_shape: bool,
}

#[derive(Debug, Clone)]
pub struct SqliteTarget {
    pub db_path: PathBuf,
    pub table_name: String,
}

/// Result of a merge run.
#[derive(Debug)]
pub struct MergeOutcome {
    pub sources: Vec<SourceSummary>,
    pub table: UnifiedTable,
    pub outputs: Vec<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct SourceSummary {
    pub id: String,
    pub rows: usize,
}

/// Runs the full merge pipeline.
pub fn run_merge(config: &MergeConfig) -> Result<MergeOutcome> {
    let span = info_span!("merge", input = %config.input_dir.display());
    let _guard = span.enter();

    let files = {
        let _stage = info_span!("discover").entered();
        let files = list_csv_files(&config.input_dir).context("discover source files")?;
        info!(files = files.len(), "discovered source files");
        files
    };

    let tables = {
        let _stage = info_span!("load").entered();
        load_source_tables(&files, config.check_shape).context("load source files")?
    };

    let schema = {
        let _stage = info_span!("map").entered();
        load_schema(config.schema_path.as_deref())?
    };
    if let Some(path) = &config.export_schema {
        write_schema_map(path, &schema).context("export schema map")?;
        info!(path = %path.display(), "exported effective schema map");
    }

    let table = {
        let _stage = info_span!("reconcile").entered();
        reconcile(&tables, &schema).context("reconcile source tables")?
    };

    let sources = tables
        .iter()
        .map(|t| SourceSummary {
            id: t.id.to_string(),
            rows: t.rows.len(),
        })
        .collect();

    let mut outputs = Vec::new();
    if config.dry_run {
        info!("dry run: skipping output generation");
    } else {
        let _stage = info_span!("export").entered();
        std::fs::create_dir_all(&config.output_dir)
            .with_context(|| format!("create output directory {}", config.output_dir.display()))?;
        for format in &config.formats {
            let path = config
                .output_dir
                .join(format!("{}.{}", config.name, format.extension()));
            export(&table, *format, &path).context("export unified table")?;
            info!(path = %path.display(), "wrote output");
            outputs.push(path);
        }
        if let Some(target) = &config.sqlite {
            export_to_sqlite(&target.db_path, &target.table_name, &table)
                .context("export to SQLite")?;
            outputs.push(target.db_path.clone());
        }
    }

    Ok(MergeOutcome {
        sources,
        table,
        outputs,
        dry_run: config.dry_run,
    })
}

/// Loads the schema-map document, or the built-in rules when no path is given.
pub fn load_schema(path: Option<&Path>) -> Result<SchemaMap> {
    match path {
        Some(path) => load_schema_map(path)
            .with_context(|| format!("load schema map {}", path.display())),
        None => Ok(builtin_schema_map()),
    }
}
