//! Command implementations: read, process, write, summarize.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use reestr_core::processor::{DataProcessor, PostSheets};
use reestr_ingest::{read_sheets, read_table, write_table};
use reestr_model::DecodeConfig;

use crate::cli::{ConvertArgs, PostArgs};

/// Outcome of one conversion run, rendered into the CLI summary.
pub struct RunSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    pub columns_out: usize,
    pub output: PathBuf,
}

fn load_config(path: Option<&Path>) -> Result<DecodeConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parse config {}", path.display()))
        }
        None => Ok(DecodeConfig::default()),
    }
}

pub fn run_convert(args: &ConvertArgs) -> Result<RunSummary> {
    let config = load_config(args.config.as_deref())?;
    let df = read_table(&args.input)?;
    let rows_in = df.height();

    let decoded = DataProcessor::new(config).process_table(df)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("out.csv"));
    write_table(&decoded, &output)?;
    info!(output = %output.display(), "conversion finished");
    Ok(RunSummary {
        rows_in,
        rows_out: decoded.height(),
        columns_out: decoded.width(),
        output,
    })
}

pub fn run_post(args: &PostArgs) -> Result<RunSummary> {
    let config = load_config(args.config.as_deref())?;
    let sheet_map = read_sheets(&args.sheet_dir)?;
    let rows_in = sheet_map.values().map(|df| df.height()).sum();

    let sheets = PostSheets::from_map(sheet_map)?;
    let decoded = DataProcessor::new(config).process_post(sheets)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.sheet_dir.join("reestr-out.csv"));
    write_table(&decoded, &output)?;
    info!(output = %output.display(), "conversion finished");
    Ok(RunSummary {
        rows_in,
        rows_out: decoded.height(),
        columns_out: decoded.width(),
        output,
    })
}
