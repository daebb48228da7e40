use std::path::PathBuf;

use anyhow::{Context, Result};

use bankmerge_map::schema_map_to_json;
use bankmerge_output::ExportFormat;

use crate::cli::{FormatArg, MergeArgs, SchemaArgs};
use crate::pipeline::{MergeConfig, MergeOutcome, SqliteTarget, load_schema, run_merge};

pub fn run_merge_command(args: &MergeArgs) -> Result<MergeOutcome> {
    let config = MergeConfig {
        input_dir: args.input_dir.clone(),
        schema_path: args.schema.clone(),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(".")),
        name: args.name.clone(),
        formats: formats(args.format),
        sqlite: args.sqlite.as_ref().map(|db_path| SqliteTarget {
            db_path: db_path.clone(),
            table_name: args.table.clone(),
        }),
        dry_run: args.dry_run,
        export_schema: args.export_schema.clone(),
        check_shape: !args.ignore_shape,
    };
    run_merge(&config)
}

pub fn run_schema_command(args: &SchemaArgs) -> Result<()> {
    let schema = load_schema(args.schema.as_deref())?;
    let json = schema_map_to_json(&schema);
    let pretty = serde_json::to_string_pretty(&json).context("render schema map")?;
    println!("{pretty}");
    Ok(())
}

fn formats(arg: FormatArg) -> Vec<ExportFormat> {
    match arg {
        FormatArg::Csv => vec![ExportFormat::Csv],
        FormatArg::Json => vec![ExportFormat::Json],
        FormatArg::Xml => vec![ExportFormat::Xml],
        FormatArg::All => ExportFormat::all().to_vec(),
    }
}
