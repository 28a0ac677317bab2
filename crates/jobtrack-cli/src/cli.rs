//! CLI argument definitions for `jobtrack`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use jobtrack_import::SourceKind;
use jobtrack_model::ImportMode;

#[derive(Parser)]
#[command(
    name = "jobtrack",
    version,
    about = "Bulk-import job applications from CSV or JSON",
    long_about = "Bulk-import job applications from CSV or JSON files.\n\n\
                  Every import is previewed first: records are split into valid,\n\
                  invalid and duplicate buckets before anything is written."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow record values (names, emails) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the column mapping detected for a CSV file.
    Detect(DetectArgs),

    /// Preview an import without writing anything.
    Preview(PreviewArgs),

    /// Preview an import and commit it into a record store.
    Import(ImportArgs),

    /// List or delete saved column mappings.
    Mappings(MappingsArgs),

    /// List the application fields a column can map to.
    Fields,
}

#[derive(Args)]
pub struct DetectArgs {
    /// CSV file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Save the detected mapping under this name for later review.
    #[arg(long = "save", value_name = "NAME")]
    pub save: Option<String>,

    /// Directory of saved mappings.
    #[arg(long = "mapping-dir", value_name = "DIR", default_value = ".jobtrack/mappings")]
    pub mapping_dir: PathBuf,
}

#[derive(Args)]
pub struct MappingsArgs {
    /// Directory of saved mappings.
    #[arg(long = "mapping-dir", value_name = "DIR", default_value = ".jobtrack/mappings")]
    pub mapping_dir: PathBuf,

    /// Delete the saved mapping with this name.
    #[arg(long = "delete", value_name = "NAME")]
    pub delete: Option<String>,
}

/// Options shared by `preview` and `import`.
#[derive(Args)]
pub struct SourceArgs {
    /// CSV or JSON file to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Input format (default: by extension, then by content).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Column mapping file for CSV input (default: auto-detect).
    #[arg(long = "mapping", value_name = "MAPPING.json")]
    pub mapping: Option<PathBuf>,

    /// Reject CSV rows whose optional values do not parse, as JSON import does.
    #[arg(long = "strict-optional")]
    pub strict_optional: bool,

    /// Also treat near-identical company and position pairs as duplicates.
    #[arg(
        long = "fuzzy-duplicates",
        value_name = "THRESHOLD",
        num_args = 0..=1,
        default_missing_value = "0.92"
    )]
    pub fuzzy_duplicates: Option<f64>,

    /// How to print the result.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Record store to check duplicates against.
    #[arg(long = "existing", value_name = "STORE.json")]
    pub existing: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Record store to import into (created when missing).
    #[arg(long = "store", value_name = "STORE.json")]
    pub store: PathBuf,

    /// Merge with existing records or replace them.
    #[arg(long = "mode", value_enum, default_value = "merge")]
    pub mode: ModeArg,

    /// Preview only; leave the store untouched.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for SourceKind {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Merge,
    Replace,
}

impl From<ModeArg> for ImportMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Merge => Self::Merge,
            ModeArg::Replace => Self::Replace,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
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
