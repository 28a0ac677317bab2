//! Job application import CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use jobtrack_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputArg};
use jobtrack_cli::commands::{run_detect, run_import, run_mappings, run_preview};
use jobtrack_cli::logging::{LogConfig, LogFormat, init_logging};
use jobtrack_import::{CommitSummary, ImportReport};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

mod summary;

use crate::summary::{print_detect, print_fields, print_import, print_mappings, print_preview};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Runs one command; the exit code is 1 when the import payload was
/// rejected as a whole.
fn run(command: &Command) -> Result<i32> {
    match command {
        Command::Detect(args) => {
            print_detect(&run_detect(args)?);
            Ok(0)
        }
        Command::Mappings(args) => {
            print_mappings(&run_mappings(args)?);
            Ok(0)
        }
        Command::Preview(args) => {
            let outcome = run_preview(args)?;
            match args.source.output {
                OutputArg::Table => print_preview(&outcome),
                OutputArg::Json => print_json(&outcome.report)?,
            }
            Ok(exit_code(outcome.report.preview().valid))
        }
        Command::Import(args) => {
            let outcome = run_import(args)?;
            match args.source.output {
                OutputArg::Table => print_import(&outcome),
                OutputArg::Json => print_json(&ImportJson {
                    report: &outcome.report,
                    commit: outcome.commit.as_ref(),
                })?,
            }
            Ok(exit_code(outcome.report.preview().valid))
        }
        Command::Fields => {
            print_fields();
            Ok(0)
        }
    }
}

#[derive(Serialize)]
struct ImportJson<'a> {
    report: &'a ImportReport,
    commit: Option<&'a CommitSummary>,
}

fn exit_code(valid: bool) -> i32 {
    if valid { 0 } else { 1 }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
