//! CLI argument definitions for the bank transaction merger.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bankmerge",
    version,
    about = "Merge heterogeneous bank transaction CSV exports into one table",
    long_about = "Merge per-institution CSV transaction exports into one unified table.\n\n\
                  Column names are reconciled via a schema-map document; sources with no\n\
                  specific entry merge via the mandatory default rule. Outputs CSV, JSON,\n\
                  XML, or a SQLite table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge a directory of CSV exports into unified output files.
    Merge(MergeArgs),

    /// Print the effective schema map as a JSON document.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct MergeArgs {
    /// Directory containing the per-institution CSV exports.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Schema-map document (JSON). Built-in default rules are used when omitted.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Output directory (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base name for output files.
    #[arg(long = "name", value_name = "STEM", default_value = "merged_data")]
    pub name: String,

    /// Output format to generate.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// Also append rows into this SQLite database.
    #[arg(long = "sqlite", value_name = "DB_PATH")]
    pub sqlite: Option<PathBuf>,

    /// Target table name for the SQLite export.
    #[arg(long = "table", value_name = "NAME", default_value = "transactions")]
    pub table: String,

    /// Load and reconcile but write no outputs (schema export still happens).
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the effective schema map to this path for auditing.
    #[arg(long = "export-schema", value_name = "PATH")]
    pub export_schema: Option<PathBuf>,

    /// Silence the warning when source files disagree on column count.
    #[arg(long = "ignore-shape")]
    pub ignore_shape: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Schema-map document to print; the built-in rules when omitted.
    #[arg(value_name = "PATH")]
    pub schema: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
    Xml,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
