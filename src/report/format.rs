//! Reporting utilities: comparison cards and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized (important for golden tests)

use chrono::NaiveDate;

use crate::analysis::return_over;
use crate::app::pipeline::SessionData;
use crate::domain::{RangeSpec, ReturnResult, Series};

use super::{Comparison, PeriodReturn};

/// Compute fund (and optionally benchmark) returns for every period.
pub fn compute_comparison(
    fund: &Series,
    benchmark: Option<&Series>,
    today: NaiveDate,
) -> Comparison {
    let periods = RangeSpec::ALL_PERIODS
        .iter()
        .map(|&range| PeriodReturn {
            range,
            fund: return_over(fund, range, today),
            benchmark: benchmark.map(|b| return_over(b, range, today)),
        })
        .collect();

    Comparison { periods }
}

/// Format the run summary (scheme metadata + latest NAV + data quality).
pub fn format_summary(session: &SessionData) -> String {
    let mut out = String::new();

    out.push_str("=== navscope - Mutual Fund NAV Tracker ===\n");
    out.push_str(&format!(
        "Scheme: {} ({})\n",
        session.meta.scheme_name, session.meta.scheme_code
    ));
    out.push_str(&format!("Fund house: {}\n", session.meta.fund_house));
    out.push_str(&format!("Category: {}\n", session.meta.scheme_category));

    if let Some(latest) = session.fund.last() {
        out.push_str(&format!("Latest NAV: {:.4} ({})\n", latest.value, latest.date));
    }

    let source = if session.from_cache { "cache" } else { "network" };
    out.push_str(&format!(
        "Data: {} fund samples ({} dropped) via {source}, fetched {}\n",
        session.fund.len(),
        session.fund_dropped,
        session.fetched_on
    ));

    match (&session.benchmark, &session.benchmark_note) {
        (Some(bench), _) => out.push_str(&format!(
            "Benchmark: {} samples ({} dropped)\n",
            bench.len(),
            session.benchmark_dropped
        )),
        (None, Some(note)) => out.push_str(&format!("Benchmark: unavailable ({note})\n")),
        (None, None) => out.push_str("Benchmark: disabled\n"),
    }

    out.push('\n');
    out
}

/// Format the per-period comparison cards as a table.
pub fn format_comparison(comparison: &Comparison) -> String {
    let with_benchmark = comparison.periods.iter().any(|p| p.benchmark.is_some());

    let mut out = String::new();
    out.push_str("Period returns:\n");

    if with_benchmark {
        out.push_str(&format!("{:<8} {:>14} {:>14}\n", "period", "fund", "benchmark"));
        out.push_str(&format!("{:-<8} {:->14} {:->14}\n", "", "", ""));
    } else {
        out.push_str(&format!("{:<8} {:>14}\n", "period", "fund"));
        out.push_str(&format!("{:-<8} {:->14}\n", "", ""));
    }

    for p in &comparison.periods {
        if with_benchmark {
            let bench = p.benchmark.unwrap_or(ReturnResult::Unavailable);
            out.push_str(&format!(
                "{:<8} {:>14} {:>14}\n",
                p.range.display_name(),
                p.fund.to_string(),
                bench.to_string()
            ));
        } else {
            out.push_str(&format!(
                "{:<8} {:>14}\n",
                p.range.display_name(),
                p.fund.to_string()
            ));
        }
    }

    out
}
