//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "odelia-meta",
    version,
    about = "Reconcile imaging-case metadata against modality groups",
    long_about = "Reconcile imaging-case metadata against modality groups.\n\n\
                  Detects and normalizes the diagnosis label, counts the cases that\n\
                  carry each group's required modalities, and exports one filtered\n\
                  index per group together with a JSON summary and charts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machines).
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

    /// Allow case identifiers and label values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate modality groups and export one index per group.
    Reconcile(ReconcileArgs),

    /// Report institution, modality, and age statistics.
    Describe(DescribeArgs),

    /// List the configured modality groups.
    Groups(GroupsArgs),
}

#[derive(Args)]
pub struct ReconcileArgs {
    /// Metadata CSV with UID, Institution, has_* flags and a label column.
    #[arg(value_name = "META_CSV")]
    pub metadata: PathBuf,

    /// Output directory for indexes, summary, and charts.
    #[arg(long = "out", value_name = "DIR")]
    pub out: PathBuf,

    /// Label column to use instead of autodetection.
    #[arg(long = "label-column", value_name = "NAME")]
    pub label_column: Option<String>,

    /// UID-to-label CSV merged into the metadata before reconciling.
    #[arg(long = "labels", value_name = "CSV")]
    pub labels: Option<PathBuf>,

    /// TOML file with `[[group]]` definitions (default: built-in groups).
    #[arg(long = "groups", value_name = "TOML")]
    pub groups: Option<PathBuf>,

    /// Skip chart rendering.
    #[arg(long = "no-charts")]
    pub no_charts: bool,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Metadata CSV to describe.
    #[arg(
        value_name = "META_CSV",
        required_unless_present = "root",
        conflicts_with = "root"
    )]
    pub metadata: Option<PathBuf>,

    /// Dataset root holding `<config>/<split>/metadata.csv`.
    #[arg(long = "root", value_name = "DIR", requires = "split")]
    pub root: Option<PathBuf>,

    /// Dataset configuration directory under the root.
    #[arg(long = "config", value_name = "NAME", default_value = "unilateral")]
    pub config: String,

    /// Dataset split directory under the configuration.
    #[arg(long = "split", value_name = "NAME")]
    pub split: Option<String>,

    /// Output directory (default: the metadata file's directory).
    #[arg(long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// File name prefix for charts and the summary.
    #[arg(long = "prefix", value_name = "PREFIX", default_value = "report")]
    pub prefix: String,

    /// Skip chart rendering.
    #[arg(long = "no-charts")]
    pub no_charts: bool,
}

#[derive(Args)]
pub struct GroupsArgs {
    /// TOML file with `[[group]]` definitions (default: built-in groups).
    #[arg(long = "groups", value_name = "TOML")]
    pub groups: Option<PathBuf>,
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
