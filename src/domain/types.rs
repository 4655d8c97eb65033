//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during analysis
//! - written to / reloaded from the snapshot cache
//! - exported to CSV for downstream tooling

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One NAV or index observation (day precision).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub value: f64,
}

/// An ordered observation series: strictly increasing dates, no duplicates.
///
/// A `Series` is built once per load (via [`crate::analysis::normalize`] or
/// [`Series::from_samples`]) and is immutable afterwards; range filtering and
/// alignment always derive a new `Series` rather than mutating the source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Build a series from samples in arbitrary order.
    ///
    /// Samples are sorted ascending by date; duplicate dates are collapsed to
    /// the occurrence that appeared last in the input.
    pub fn from_samples(mut samples: Vec<Sample>) -> Self {
        // Stable sort: within a duplicate-date run the input order survives,
        // so keeping the last element of the run keeps the latest occurrence.
        samples.sort_by_key(|s| s.date);

        let mut deduped: Vec<Sample> = Vec::with_capacity(samples.len());
        for s in samples {
            match deduped.last_mut() {
                Some(prev) if prev.date == s.date => *prev = s,
                _ => deduped.push(s),
            }
        }

        Self { samples: deduped }
    }

    /// Wrap samples that are already sorted ascending with unique dates.
    ///
    /// Used internally when deriving views (suffix slices, intersections) from
    /// a series whose invariant already holds.
    pub(crate) fn from_sorted(samples: Vec<Sample>) -> Self {
        debug_assert!(samples.windows(2).all(|w| w[0].date < w[1].date));
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => Some((a.date, b.date)),
            _ => None,
        }
    }
}

/// Output of normalization: the cleaned series plus a count of raw entries
/// that did not survive (unparseable dates, non-numeric values, duplicate
/// dates). The count exists purely for observability; dropped entries never
/// fail the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub series: Series,
    pub dropped: usize,
}

/// Lookback window selector.
///
/// Cutoffs are calendar-based (months/years back from "today"), not fixed
/// sample counts, so irregular trading calendars cannot skew the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangeSpec {
    #[value(name = "1m")]
    M1,
    #[value(name = "3m")]
    M3,
    #[value(name = "6m")]
    M6,
    #[value(name = "1y")]
    Y1,
    #[value(name = "5y")]
    Y5,
    #[value(name = "all")]
    All,
}

impl RangeSpec {
    /// Every period, shortest lookback first.
    pub const ALL_PERIODS: [RangeSpec; 6] = [
        RangeSpec::M1,
        RangeSpec::M3,
        RangeSpec::M6,
        RangeSpec::Y1,
        RangeSpec::Y5,
        RangeSpec::All,
    ];

    /// Calendar lookback in months; `None` for the unbounded window.
    pub fn months(self) -> Option<u32> {
        match self {
            RangeSpec::M1 => Some(1),
            RangeSpec::M3 => Some(3),
            RangeSpec::M6 => Some(6),
            RangeSpec::Y1 => Some(12),
            RangeSpec::Y5 => Some(60),
            RangeSpec::All => None,
        }
    }

    /// Label for terminal output and table headers.
    pub fn display_name(self) -> &'static str {
        match self {
            RangeSpec::M1 => "1M",
            RangeSpec::M3 => "3M",
            RangeSpec::M6 => "6M",
            RangeSpec::Y1 => "1Y",
            RangeSpec::Y5 => "5Y",
            RangeSpec::All => "ALL",
        }
    }
}

/// Percentage return over a window, or the "unavailable" sentinel when the
/// window has fewer than two samples or a zero baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReturnResult {
    /// Signed percentage, already rounded to 2 decimal places.
    Pct(f64),
    Unavailable,
}

impl std::fmt::Display for ReturnResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReturnResult::Pct(p) => write!(f, "{p:.2}%"),
            ReturnResult::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A raw observation as delivered by a fetcher, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSample {
    pub date: RawDate,
    pub value: RawValue,
}

/// Raw date forms seen on the wire: `"DD-MM-YYYY"` / `"YYYY-MM-DD"` text
/// (mfapi) or epoch seconds (Yahoo chart API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    EpochSeconds(i64),
    Text(String),
}

/// Raw value forms seen on the wire: a number or a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// One fund NAV record exactly as mfapi.in returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFundRecord {
    /// `"DD-MM-YYYY"`.
    pub date: String,
    /// Decimal string, e.g. `"104.3961"`.
    pub nav: String,
}

/// One benchmark quote from the Yahoo chart API. `close` is nullable on the
/// wire (market holidays, partial days) and such quotes are dropped during
/// normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuote {
    pub timestamp: i64,
    pub close: Option<f64>,
}

/// Scheme metadata from the fund API, shown in summaries and the TUI header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundMeta {
    pub scheme_code: u32,
    pub scheme_name: String,
    pub fund_house: String,
    pub scheme_category: String,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults). There is deliberately no
/// module-level state: the TUI and CLI both own one of these and pass it down.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scheme_code: u32,
    /// Yahoo Finance symbol for the benchmark index (e.g. `^NSEI`).
    pub benchmark_symbol: String,
    pub with_benchmark: bool,
    /// Window used for the chart; comparison cards always cover every period.
    pub range: RangeSpec,
    /// Bypass the snapshot cache and re-fetch.
    pub refresh: bool,
    pub cache_dir: PathBuf,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export: Option<PathBuf>,
}
