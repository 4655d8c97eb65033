//! Command-line parsing for the NAV tracker.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the analysis code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::RangeSpec;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "navscope", version, about = "Mutual fund NAV tracker with benchmark comparison")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch NAV history, print the summary, comparison cards, and a chart.
    Show(FetchArgs),
    /// Print comparison cards only (useful for scripting).
    Compare(FetchArgs),
    /// Write the range-filtered series to CSV.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same fetch/normalize pipeline as `navscope show`, but
    /// renders the chart and comparison cards in a terminal UI using Ratatui.
    Tui(FetchArgs),
}

/// Common options for fetching and analysis.
#[derive(Debug, Parser, Clone)]
pub struct FetchArgs {
    /// AMFI scheme code of the mutual fund.
    #[arg(short = 's', long, default_value_t = 125497)]
    pub scheme: u32,

    /// Yahoo Finance symbol of the benchmark index.
    #[arg(short = 'b', long, default_value = "^NSEI")]
    pub benchmark: String,

    /// Skip the benchmark entirely (fund-only output).
    #[arg(long)]
    pub no_benchmark: bool,

    /// Lookback window for the chart and export. Comparison cards always
    /// cover every period.
    #[arg(short = 'r', long, value_enum, default_value_t = RangeSpec::All)]
    pub range: RangeSpec,

    /// Re-fetch even when a cached snapshot exists.
    #[arg(long)]
    pub refresh: bool,

    /// Directory for cached snapshots.
    #[arg(long, default_value = ".navscope-cache")]
    pub cache_dir: PathBuf,

    /// Render the terminal chart (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for CSV export.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Output CSV path.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,
}
