//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Report Splitter - per-platform report generation
#[derive(Parser, Debug)]
#[command(
    name = "report-splitter",
    author,
    version,
    about = "Split a delivery dataset into per-platform reports",
    long_about = "Loads a delivery dataset, partitions it by platform and by configured\n\
                  delivery-name groups, and writes one report per partition to every\n\
                  configured sink."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        global = true,
        env = "REPORT_SPLITTER_VERBOSE"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "REPORT_SPLITTER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate every report
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Show the partitions a run would produce
    Plan(PlanArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "report.toml",
        env = "REPORT_SPLITTER_CONFIG"
    )]
    pub config: PathBuf,

    /// Override the dataset path from configuration
    #[arg(short, long, env = "REPORT_SPLITTER_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Replace the platform allow-list (repeatable)
    #[arg(short, long = "platform", value_name = "ID")]
    pub platforms: Vec<String>,

    /// Write the report manifest to this file
    #[arg(short, long, env = "REPORT_SPLITTER_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Select partitions and exit without generating reports
    #[arg(long)]
    pub dry_run: bool,

    /// Prometheus metrics port (disabled when unset)
    #[arg(long, env = "REPORT_SPLITTER_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "report.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `plan` command
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "report.toml")]
    pub config: PathBuf,

    /// Override the dataset path from configuration
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
