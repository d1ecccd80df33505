//! CLI argument definitions for the health-export pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hxp",
    version,
    about = "Health-export pipeline - ingest XML exports and clean the extracted tables",
    long_about = "Ingest a health-export XML document into a delimited record table,\n\
                  then apply a declarative cleaning specification (filter,\n\
                  remove-columns, retype) to produce an analysis-ready file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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
    /// Parse an export document and extract the record table.
    Ingest(IngestArgs),

    /// Apply a cleaning specification to an extracted table.
    Clean(CleanArgs),

    /// Ingest and clean in one invocation.
    Run(RunArgs),
}

#[derive(Parser)]
pub struct IngestArgs {
    /// Path to the source health-export XML document.
    #[arg(long = "source", value_name = "PATH")]
    pub source: PathBuf,

    /// Where to write the post-parse duplicate of the document.
    #[arg(long = "duplicate", value_name = "PATH")]
    pub duplicate: PathBuf,

    /// Where to write the extracted delimited table.
    #[arg(long = "table", value_name = "PATH")]
    pub table: PathBuf,

    /// Tag name of the repeating element to extract (e.g. Record).
    #[arg(long = "selector", value_name = "TAG")]
    pub selector: String,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Delimited table produced by ingestion.
    #[arg(long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Where to write the cleaned table (whole-file overwrite).
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// JSON cleaning specification file.
    #[arg(long = "spec", value_name = "PATH")]
    pub spec: PathBuf,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the source health-export XML document.
    #[arg(long = "source", value_name = "PATH")]
    pub source: PathBuf,

    /// Where to write the post-parse duplicate of the document.
    #[arg(long = "duplicate", value_name = "PATH")]
    pub duplicate: PathBuf,

    /// Where to write the extracted delimited table.
    #[arg(long = "table", value_name = "PATH")]
    pub table: PathBuf,

    /// Tag name of the repeating element to extract (e.g. Record).
    #[arg(long = "selector", value_name = "TAG")]
    pub selector: String,

    /// JSON cleaning specification file.
    #[arg(long = "spec", value_name = "PATH")]
    pub spec: PathBuf,

    /// Where to write the cleaned table (whole-file overwrite).
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
