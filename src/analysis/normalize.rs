//! Turn raw wire records into a clean, ordered [`Series`].
//!
//! Normalization never fails: entries with unparseable dates or non-numeric
//! values are dropped and counted, so partial upstream data degrades the
//! series instead of crashing the run.

use chrono::{DateTime, NaiveDate};

use crate::domain::{Normalized, RawDate, RawFundRecord, RawQuote, RawSample, RawValue, Sample, Series};

/// Normalize raw samples of any origin.
///
/// Output is sorted ascending by date with duplicate dates collapsed to the
/// latest occurrence. `dropped` counts every raw entry that did not make it
/// into the series (bad date, bad value, or shadowed duplicate).
pub fn normalize(raw: &[RawSample]) -> Normalized {
    let mut samples = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for r in raw {
        match (parse_date(&r.date), parse_value(&r.value)) {
            (Some(date), Some(value)) => samples.push(Sample { date, value }),
            _ => dropped += 1,
        }
    }

    let parsed = samples.len();
    let series = Series::from_samples(samples);
    dropped += parsed - series.len();

    Normalized { series, dropped }
}

/// Normalize fund NAV records (`{date: "DD-MM-YYYY", nav: "104.3961"}`).
pub fn normalize_fund(records: &[RawFundRecord]) -> Normalized {
    let raw: Vec<RawSample> = records
        .iter()
        .map(|r| RawSample {
            date: RawDate::Text(r.date.clone()),
            value: RawValue::Text(r.nav.clone()),
        })
        .collect();
    normalize(&raw)
}

/// Normalize benchmark quotes (epoch seconds + nullable close).
///
/// Null closes are dropped here, before generic normalization, and counted
/// with the rest of the dropped entries.
pub fn normalize_quotes(quotes: &[RawQuote]) -> Normalized {
    let mut raw = Vec::with_capacity(quotes.len());
    let mut null_closes = 0usize;

    for q in quotes {
        match q.close {
            Some(close) => raw.push(RawSample {
                date: RawDate::EpochSeconds(q.timestamp),
                value: RawValue::Number(close),
            }),
            None => null_closes += 1,
        }
    }

    let mut out = normalize(&raw);
    out.dropped += null_closes;
    out
}

fn parse_date(raw: &RawDate) -> Option<NaiveDate> {
    match raw {
        RawDate::EpochSeconds(secs) => DateTime::from_timestamp(*secs, 0).map(|dt| dt.date_naive()),
        RawDate::Text(text) => {
            let trimmed = text.trim();
            // mfapi uses DD-MM-YYYY; ISO is accepted as well for cache files
            // and hand-written fixtures.
            NaiveDate::parse_from_str(trimmed, "%d-%m-%Y")
                .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
                .ok()
        }
    }
}

fn parse_value(raw: &RawValue) -> Option<f64> {
    let v = match raw {
        RawValue::Number(v) => *v,
        RawValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed == "." {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
    };
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_sample(date: &str, value: &str) -> RawSample {
        RawSample {
            date: RawDate::Text(date.to_string()),
            value: RawValue::Text(value.to_string()),
        }
    }

    #[test]
    fn drops_non_numeric_values_and_preserves_order() {
        let raw = vec![
            text_sample("03-01-2024", "102.5"),
            text_sample("01-01-2024", "100.0"),
            text_sample("02-01-2024", "N.A."),
            text_sample("04-01-2024", "103.0"),
        ];

        let out = normalize(&raw);
        assert_eq!(out.dropped, 1);
        let values: Vec<f64> = out.series.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![100.0, 102.5, 103.0]);
        assert!(
            out.series
                .samples()
                .windows(2)
                .all(|w| w[0].date < w[1].date)
        );
    }

    #[test]
    fn drops_unparseable_dates() {
        let raw = vec![
            text_sample("not-a-date", "100.0"),
            text_sample("01-01-2024", "100.0"),
        ];
        let out = normalize(&raw);
        assert_eq!(out.series.len(), 1);
        assert_eq!(out.dropped, 1);
    }

    #[test]
    fn accepts_iso_dates_and_epoch_seconds() {
        let raw = vec![
            text_sample("2024-01-01", "100.0"),
            RawSample {
                // 2024-01-02T00:00:00Z
                date: RawDate::EpochSeconds(1_704_153_600),
                value: RawValue::Number(101.0),
            },
        ];
        let out = normalize(&raw);
        assert_eq!(out.dropped, 0);
        assert_eq!(out.series.len(), 2);
    }

    #[test]
    fn duplicate_dates_keep_latest_and_count_as_dropped() {
        let raw = vec![
            text_sample("01-01-2024", "100.0"),
            text_sample("01-01-2024", "101.0"),
        ];
        let out = normalize(&raw);
        assert_eq!(out.series.len(), 1);
        assert_eq!(out.series.first().unwrap().value, 101.0);
        assert_eq!(out.dropped, 1);
    }

    #[test]
    fn normalize_fund_parses_nav_strings() {
        let records = vec![
            RawFundRecord { date: "02-01-2024".to_string(), nav: "104.3961".to_string() },
            RawFundRecord { date: "01-01-2024".to_string(), nav: "103.0000".to_string() },
        ];
        let out = normalize_fund(&records);
        assert_eq!(out.dropped, 0);
        assert_eq!(out.series.first().unwrap().value, 103.0);
        assert!((out.series.last().unwrap().value - 104.3961).abs() < 1e-9);
    }

    #[test]
    fn normalize_quotes_drops_null_closes() {
        let quotes = vec![
            RawQuote { timestamp: 1_704_067_200, close: Some(21_000.0) },
            RawQuote { timestamp: 1_704_153_600, close: None },
            RawQuote { timestamp: 1_704_240_000, close: Some(21_100.0) },
        ];
        let out = normalize_quotes(&quotes);
        assert_eq!(out.series.len(), 2);
        assert_eq!(out.dropped, 1);
    }

    #[test]
    fn non_finite_numbers_are_dropped() {
        let raw = vec![RawSample {
            date: RawDate::Text("01-01-2024".to_string()),
            value: RawValue::Number(f64::NAN),
        }];
        let out = normalize(&raw);
        assert!(out.series.is_empty());
        assert_eq!(out.dropped, 1);
    }
}
