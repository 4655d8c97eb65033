//! Shared "load session" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! cache-or-fetch -> normalize -> immutable session series
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! The session object replaces the module-level mutable state the original
//! tooling in this space tends to accumulate: the caller owns one
//! `SessionData` and every analysis call takes the series explicitly.

use chrono::{Local, NaiveDate};

use crate::analysis::{normalize_fund, normalize_quotes};
use crate::data::{MfApiClient, YahooClient};
use crate::domain::{FundMeta, RunConfig, Series};
use crate::error::AppError;
use crate::io::cache::{self, Snapshot};

/// Everything a front-end needs for one scheme: normalized immutable series
/// plus provenance and data-quality counters.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub meta: FundMeta,
    pub fund: Series,
    pub fund_dropped: usize,
    pub benchmark: Option<Series>,
    pub benchmark_dropped: usize,
    /// Why the benchmark is missing, when it was requested but unavailable.
    pub benchmark_note: Option<String>,
    pub fetched_on: NaiveDate,
    pub from_cache: bool,
}

/// Load a session from the snapshot cache, fetching when the cache misses or
/// `config.refresh` is set. A successful fetch rewrites the snapshot.
pub fn load_session(config: &RunConfig) -> Result<SessionData, AppError> {
    let path = cache::snapshot_path(&config.cache_dir, config.scheme_code);

    if !config.refresh && path.exists() {
        let snapshot = cache::read_snapshot(&path)?;
        return Ok(build_session(&snapshot, None, true, config));
    }

    fetch_session(config)
}

/// Fetch from the network unconditionally and rewrite the snapshot cache.
pub fn fetch_session(config: &RunConfig) -> Result<SessionData, AppError> {
    let (snapshot, benchmark_note) = fetch_snapshot(config)?;
    let path = cache::snapshot_path(&config.cache_dir, config.scheme_code);
    cache::write_snapshot(&path, &snapshot)?;
    Ok(build_session(&snapshot, benchmark_note, false, config))
}

/// Fetch fund and (optionally) benchmark data.
///
/// Fund failure is fatal. Benchmark failure is not: the session degrades to
/// fund-only and the failure reason is surfaced verbatim, never papered over
/// with synthetic data.
fn fetch_snapshot(config: &RunConfig) -> Result<(Snapshot, Option<String>), AppError> {
    let fund = MfApiClient::new().fetch_scheme(config.scheme_code)?;

    let mut benchmark = None;
    let mut benchmark_symbol = None;
    let mut benchmark_note = None;

    if config.with_benchmark {
        match YahooClient::new().fetch_chart(&config.benchmark_symbol) {
            Ok(quotes) => {
                benchmark = Some(quotes);
                benchmark_symbol = Some(config.benchmark_symbol.clone());
            }
            Err(err) => benchmark_note = Some(err.to_string()),
        }
    }

    let snapshot = Snapshot {
        tool: "navscope".to_string(),
        fetched_on: Local::now().date_naive(),
        meta: fund.meta,
        fund: fund.records,
        benchmark_symbol,
        benchmark,
    };

    Ok((snapshot, benchmark_note))
}

/// Normalize the raw snapshot records into an immutable session.
pub fn build_session(
    snapshot: &Snapshot,
    benchmark_note: Option<String>,
    from_cache: bool,
    config: &RunConfig,
) -> SessionData {
    let fund = normalize_fund(&snapshot.fund);

    let mut benchmark = None;
    let mut benchmark_dropped = 0;
    let mut note = benchmark_note;

    if config.with_benchmark {
        match &snapshot.benchmark {
            Some(quotes) => {
                let normalized = normalize_quotes(quotes);
                benchmark_dropped = normalized.dropped;
                if normalized.series.is_empty() {
                    note.get_or_insert_with(|| "benchmark series empty after normalization".to_string());
                } else {
                    benchmark = Some(normalized.series);
                }
            }
            None => {
                note.get_or_insert_with(|| {
                    "no benchmark in cached snapshot; run with --refresh".to_string()
                });
            }
        }
    }

    SessionData {
        meta: snapshot.meta.clone(),
        fund: fund.series,
        fund_dropped: fund.dropped,
        benchmark,
        benchmark_dropped,
        benchmark_note: note,
        fetched_on: snapshot.fetched_on,
        from_cache,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RangeSpec, RawFundRecord, RawQuote};
    use std::path::PathBuf;

    fn config(with_benchmark: bool) -> RunConfig {
        RunConfig {
            scheme_code: 125497,
            benchmark_symbol: "^NSEI".to_string(),
            with_benchmark,
            range: RangeSpec::All,
            refresh: false,
            cache_dir: PathBuf::from(".navscope-cache"),
            plot: false,
            plot_width: 100,
            plot_height: 25,
            export: None,
        }
    }

    fn snapshot(benchmark: Option<Vec<RawQuote>>) -> Snapshot {
        Snapshot {
            tool: "navscope".to_string(),
            fetched_on: NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
            meta: FundMeta {
                scheme_code: 125497,
                scheme_name: "Example Fund".to_string(),
                fund_house: "Example".to_string(),
                scheme_category: "Large Cap".to_string(),
            },
            fund: vec![
                RawFundRecord { date: "27-08-2026".to_string(), nav: "104.0".to_string() },
                RawFundRecord { date: "26-08-2026".to_string(), nav: "103.0".to_string() },
                RawFundRecord { date: "25-08-2026".to_string(), nav: "bad".to_string() },
            ],
            benchmark_symbol: benchmark.as_ref().map(|_| "^NSEI".to_string()),
            benchmark,
        }
    }

    #[test]
    fn build_session_normalizes_and_counts_drops() {
        let session = build_session(&snapshot(None), None, true, &config(false));
        assert_eq!(session.fund.len(), 2);
        assert_eq!(session.fund_dropped, 1);
        assert!(session.benchmark.is_none());
        assert!(session.benchmark_note.is_none());
        assert!(session.from_cache);
    }

    #[test]
    fn cached_snapshot_without_benchmark_gets_a_note() {
        let session = build_session(&snapshot(None), None, true, &config(true));
        assert!(session.benchmark.is_none());
        let note = session.benchmark_note.unwrap();
        assert!(note.contains("--refresh"));
    }

    #[test]
    fn benchmark_quotes_survive_into_the_session() {
        let quotes = vec![
            RawQuote { timestamp: 1_704_067_200, close: Some(21_000.0) },
            RawQuote { timestamp: 1_704_153_600, close: None },
            RawQuote { timestamp: 1_704_240_000, close: Some(21_100.0) },
        ];
        let session = build_session(&snapshot(Some(quotes)), None, false, &config(true));
        let bench = session.benchmark.unwrap();
        assert_eq!(bench.len(), 2);
        assert_eq!(session.benchmark_dropped, 1);
    }

    #[test]
    fn fetch_failure_note_is_preserved() {
        let session = build_session(
            &snapshot(None),
            Some("Benchmark request failed: timeout".to_string()),
            false,
            &config(true),
        );
        assert_eq!(
            session.benchmark_note.as_deref(),
            Some("Benchmark request failed: timeout")
        );
    }
}
