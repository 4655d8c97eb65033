//! Period return computation and common-base rebasing.

use chrono::NaiveDate;

use crate::domain::{RangeSpec, ReturnResult, Sample, Series};

/// Percentage change between the first and last sample of the range window.
///
/// `Unavailable` when the window has fewer than two samples or the first
/// value is zero (no defined return base). The result is rounded to two
/// decimal places, sign preserved.
pub fn return_over(series: &Series, range: RangeSpec, today: NaiveDate) -> ReturnResult {
    let window = super::filter_by_range(series, range, today);

    if window.len() < 2 {
        return ReturnResult::Unavailable;
    }
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return ReturnResult::Unavailable;
    };
    if first.value == 0.0 {
        return ReturnResult::Unavailable;
    }

    let pct = (last.value - first.value) / first.value * 100.0;
    ReturnResult::Pct((pct * 100.0).round() / 100.0)
}

/// Re-index a series so its first sample equals `base`.
///
/// Fund NAVs (~100) and index levels (~20,000) cannot share an axis; rebasing
/// both to the same starting level turns the chart into "growth of `base`".
/// A series whose first value is zero cannot be rebased and comes back empty.
pub fn rebase(series: &Series, base: f64) -> Series {
    let Some(first) = series.first() else {
        return Series::default();
    };
    if first.value == 0.0 {
        return Series::default();
    }

    let scale = base / first.value;
    Series::from_sorted(
        series
            .iter()
            .map(|s| Sample { date: s.date, value: s.value * scale })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(samples: &[(NaiveDate, f64)]) -> Series {
        Series::from_samples(
            samples
                .iter()
                .map(|&(date, value)| Sample { date, value })
                .collect(),
        )
    }

    #[test]
    fn two_sample_return_is_ten_percent() {
        let s = series(&[(d(2024, 1, 1), 100.0), (d(2024, 1, 15), 110.0)]);
        let r = return_over(&s, RangeSpec::All, d(2024, 1, 31));
        assert_eq!(r, ReturnResult::Pct(10.0));
        assert_eq!(r.to_string(), "10.00%");
    }

    #[test]
    fn single_sample_is_unavailable() {
        let s = series(&[(d(2024, 1, 1), 100.0)]);
        assert_eq!(
            return_over(&s, RangeSpec::All, d(2024, 1, 31)),
            ReturnResult::Unavailable
        );
    }

    #[test]
    fn zero_baseline_is_unavailable() {
        let s = series(&[(d(2024, 1, 1), 0.0), (d(2024, 1, 15), 110.0)]);
        assert_eq!(
            return_over(&s, RangeSpec::All, d(2024, 1, 31)),
            ReturnResult::Unavailable
        );
    }

    #[test]
    fn negative_returns_are_signed() {
        let s = series(&[(d(2024, 1, 1), 100.0), (d(2024, 1, 15), 92.5)]);
        assert_eq!(
            return_over(&s, RangeSpec::All, d(2024, 1, 31)),
            ReturnResult::Pct(-7.5)
        );
    }

    #[test]
    fn literal_fund_records_yield_twenty_percent() {
        // The normalize -> return_over path on mfapi-shaped records.
        use crate::analysis::normalize_fund;
        use crate::domain::RawFundRecord;

        let records = vec![
            RawFundRecord { date: "01-01-2024".to_string(), nav: "10".to_string() },
            RawFundRecord { date: "01-02-2024".to_string(), nav: "12".to_string() },
        ];
        let out = normalize_fund(&records);
        let r = return_over(&out.series, RangeSpec::All, d(2024, 2, 15));
        assert_eq!(r.to_string(), "20.00%");
    }

    #[test]
    fn window_return_uses_filtered_endpoints() {
        // Older samples must not leak into a 1M return.
        let s = series(&[
            (d(2023, 1, 1), 50.0),
            (d(2024, 12, 1), 100.0),
            (d(2024, 12, 20), 104.0),
        ]);
        assert_eq!(
            return_over(&s, RangeSpec::M1, d(2024, 12, 31)),
            ReturnResult::Pct(4.0)
        );
    }

    #[test]
    fn rebase_scales_to_common_start() {
        let s = series(&[(d(2024, 1, 1), 20_000.0), (d(2024, 1, 15), 21_000.0)]);
        let rebased = rebase(&s, 100.0);
        assert_eq!(rebased.first().unwrap().value, 100.0);
        assert!((rebased.last().unwrap().value - 105.0).abs() < 1e-9);
    }

    #[test]
    fn rebase_zero_start_is_empty() {
        let s = series(&[(d(2024, 1, 1), 0.0), (d(2024, 1, 15), 1.0)]);
        assert!(rebase(&s, 100.0).is_empty());
    }
}
