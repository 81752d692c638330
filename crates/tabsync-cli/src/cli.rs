//! CLI argument definitions for the workbook reconciler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabsync",
    version,
    about = "Reconcile a master/main/ledger workbook stored as a CSV directory",
    long_about = "Keeps a master table, a main aggregation table and per-editor\n\
                  ledger tables consistent: keyed projection, ledger rebuild,\n\
                  last-write-wins progress sync, duplicate flagging and derived\n\
                  formatting."
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
    /// Run the full reconciliation sweep over a workbook.
    Sweep(SweepArgs),

    /// Apply one edit event (table + cell range), then sweep.
    Event(EventArgs),

    /// Append one dated column per day of a month to every ledger.
    AppendDays(AppendDaysArgs),

    /// Create a date-stamped backup copy of the workbook directory.
    Backup(BackupArgs),
}

#[derive(Parser)]
pub struct WorkbookArgs {
    /// Path to the workbook directory (one CSV file per table).
    #[arg(value_name = "WORKBOOK_DIR")]
    pub workbook_dir: PathBuf,

    /// Workbook configuration file (JSON). Defaults match the canonical
    /// column layout.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Holiday list, one ISO date per line, used for ledger shading.
    #[arg(long = "holidays", value_name = "PATH")]
    pub holidays: Option<PathBuf>,

    /// Override "now" for timestamp stamping (format: 2026-08-27 09:00:00).
    #[arg(long = "now", value_name = "DATETIME")]
    pub now: Option<String>,

    /// Reconcile and report without writing the workbook back.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct SweepArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,
}

#[derive(Parser)]
pub struct EventArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Name of the edited table.
    #[arg(long = "table", value_name = "NAME")]
    pub table: String,

    /// First edited body row (zero-based).
    #[arg(long = "row", value_name = "ROW")]
    pub row: usize,

    /// First edited column (zero-based).
    #[arg(long = "col", value_name = "COL")]
    pub col: usize,

    /// Number of edited rows.
    #[arg(long = "rows", value_name = "N", default_value = "1")]
    pub n_rows: usize,

    /// Number of edited columns.
    #[arg(long = "cols", value_name = "N", default_value = "1")]
    pub n_cols: usize,
}

#[derive(Parser)]
pub struct AppendDaysArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Month to append, as YYYY-MM.
    #[arg(long = "month", value_name = "YYYY-MM")]
    pub month: String,
}

#[derive(Parser)]
pub struct BackupArgs {
    /// Path to the workbook directory.
    #[arg(value_name = "WORKBOOK_DIR")]
    pub workbook_dir: PathBuf,

    /// Directory receiving backup copies (default: <WORKBOOK_DIR>.backups).
    #[arg(long = "dest", value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Delete backups older than this many days.
    #[arg(long = "retain-days", value_name = "DAYS", default_value = "30")]
    pub retain_days: u64,
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
