//! CLI argument definitions for the register converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "reestr",
    version,
    about = "Register converter - normalize credit-contract exports",
    long_about = "Normalize heterogeneous consumer-credit register exports\n\
                  into the canonical tabular schema.\n\n\
                  Handles single-table exports and the multi-sheet shape\n\
                  (contracts / phones / addresses joined on a shared id)."
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

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a single-table export.
    Convert(ConvertArgs),

    /// Convert a multi-sheet export (one CSV per sheet in a directory).
    Post(PostArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Input CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV file (default: <INPUT> with an `-out` suffix).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file overriding the register defaults.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PostArgs {
    /// Directory holding the sheet CSVs (file stem = sheet name).
    #[arg(value_name = "SHEET_DIR")]
    pub sheet_dir: PathBuf,

    /// Output CSV file (default: <SHEET_DIR>/reestr-out.csv).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file overriding the register defaults.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
