//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the session (cache or network)
//! - computes comparison cards and range-filtered views
//! - prints reports/charts or launches the TUI
//! - writes optional exports

use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::analysis::{align_series, filter_by_range, rebase};
use crate::cli::{Command, ExportArgs, FetchArgs};
use crate::domain::{RunConfig, Series};
use crate::error::AppError;

pub mod pipeline;

use pipeline::SessionData;

/// Entry point for the `navscope` binary.
pub fn run() -> Result<(), AppError> {
    // We want `navscope` and `navscope -s 125497` to behave like
    // `navscope tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args, OutputMode::Full),
        Command::Compare(args) => handle_show(args, OutputMode::CardsOnly),
        Command::Export(args) => handle_export(args),
        Command::Tui(args) => crate::tui::run(run_config_from_args(&args, None)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    CardsOnly,
}

fn handle_show(args: FetchArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args, None);
    let session = pipeline::load_session(&config)?;
    let today = Local::now().date_naive();

    if mode == OutputMode::Full {
        print!("{}", crate::report::format_summary(&session));
    } else if let Some(note) = &session.benchmark_note {
        println!("Benchmark unavailable: {note}");
    }

    let (fund_view, bench_view) = aligned_views(&session);
    let comparison = crate::report::compute_comparison(&fund_view, bench_view.as_ref(), today);
    println!("{}", crate::report::format_comparison(&comparison));

    if mode == OutputMode::Full && config.plot {
        let (fund_window, bench_window) =
            chart_windows(&fund_view, bench_view.as_ref(), &config, today);
        let chart = crate::plot::render_ascii_chart(
            &fund_window,
            bench_window.as_ref(),
            config.plot_width,
            config.plot_height,
        );
        println!("{chart}");
    }

    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.fetch, Some(args.out));
    let session = pipeline::load_session(&config)?;
    let today = Local::now().date_naive();

    let (fund_view, bench_view) = aligned_views(&session);
    let fund_window = filter_by_range(&fund_view, config.range, today);
    let bench_window = bench_view.map(|b| filter_by_range(&b, config.range, today));

    let path = config
        .export
        .as_ref()
        .ok_or_else(|| AppError::config("Export path missing."))?;
    crate::io::export::write_series_csv(path, &fund_window, bench_window.as_ref())?;

    println!(
        "Wrote {} rows ({}) to {}",
        fund_window.len(),
        config.range.display_name(),
        path.display()
    );
    Ok(())
}

/// Fund and benchmark restricted to their common dates.
///
/// Comparison cards and charts must not compare a fund sample against a
/// benchmark close from a different day, so alignment happens once here and
/// every downstream view derives from the aligned pair.
pub fn aligned_views(session: &SessionData) -> (Series, Option<Series>) {
    match &session.benchmark {
        Some(bench) => {
            let (fund, bench) = align_series(&session.fund, bench);
            (fund, Some(bench))
        }
        None => (session.fund.clone(), None),
    }
}

/// Range-filter both views and rebase the benchmark onto the fund's starting
/// level so the two lines share one axis.
pub fn chart_windows(
    fund: &Series,
    benchmark: Option<&Series>,
    config: &RunConfig,
    today: NaiveDate,
) -> (Series, Option<Series>) {
    let fund_window = filter_by_range(fund, config.range, today);

    let bench_window = benchmark.and_then(|b| {
        let window = filter_by_range(b, config.range, today);
        let base = fund_window.first()?.value;
        let rebased = rebase(&window, base);
        if rebased.is_empty() { None } else { Some(rebased) }
    });

    (fund_window, bench_window)
}

pub fn run_config_from_args(args: &FetchArgs, export: Option<std::path::PathBuf>) -> RunConfig {
    RunConfig {
        scheme_code: args.scheme,
        benchmark_symbol: args.benchmark.clone(),
        with_benchmark: !args.no_benchmark,
        range: args.range,
        refresh: args.refresh,
        cache_dir: args.cache_dir.clone(),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export,
    }
}

/// Rewrite argv so `navscope` defaults to `navscope tui`.
///
/// Rules:
/// - `navscope`                      -> `navscope tui`
/// - `navscope -s 125497 ...`        -> `navscope tui -s 125497 ...`
/// - `navscope --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "compare" | "export" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
