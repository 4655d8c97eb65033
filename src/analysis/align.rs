//! Align two series onto comparable samples.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::{Sample, Series};

/// Restrict both series to their common dates.
///
/// Fund and benchmark trade on different calendars (exchange holidays, NAV
/// publication gaps), so comparison charts and cards must only look at dates
/// both series observed. The outputs are parallel-indexed: same length, same
/// date at every position.
///
/// If the date sets do not overlap at all, falls back to positional
/// truncation from the most recent end, so two series that cover disjoint
/// calendars still produce an equal-length pair instead of two empty ones.
pub fn align_series(a: &Series, b: &Series) -> (Series, Series) {
    let dates_a: HashSet<NaiveDate> = a.iter().map(|s| s.date).collect();
    let dates_b: HashSet<NaiveDate> = b.iter().map(|s| s.date).collect();

    let a_common: Vec<Sample> = a
        .iter()
        .filter(|s| dates_b.contains(&s.date))
        .copied()
        .collect();
    let b_common: Vec<Sample> = b
        .iter()
        .filter(|s| dates_a.contains(&s.date))
        .copied()
        .collect();

    if !a_common.is_empty() {
        return (Series::from_sorted(a_common), Series::from_sorted(b_common));
    }

    // No shared dates: keep the most recent n samples of each.
    let n = a.len().min(b.len());
    let a_tail = Series::from_sorted(a.samples()[a.len() - n..].to_vec());
    let b_tail = Series::from_sorted(b.samples()[b.len() - n..].to_vec());
    (a_tail, b_tail)
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
    fn intersection_keeps_shared_dates_only() {
        let fund = series(&[
            (d(2024, 1, 1), 100.0),
            (d(2024, 1, 2), 101.0),
            (d(2024, 1, 3), 102.0),
        ]);
        let bench = series(&[
            (d(2024, 1, 2), 20_000.0),
            (d(2024, 1, 3), 20_100.0),
            (d(2024, 1, 4), 20_200.0),
        ]);

        let (f, b) = align_series(&fund, &bench);
        let f_dates: Vec<NaiveDate> = f.iter().map(|s| s.date).collect();
        let b_dates: Vec<NaiveDate> = b.iter().map(|s| s.date).collect();
        assert_eq!(f_dates, vec![d(2024, 1, 2), d(2024, 1, 3)]);
        assert_eq!(b_dates, f_dates);
    }

    #[test]
    fn disjoint_dates_fall_back_to_tail_truncation() {
        let fund = series(&[
            (d(2024, 1, 1), 100.0),
            (d(2024, 1, 3), 101.0),
            (d(2024, 1, 5), 102.0),
        ]);
        let bench = series(&[(d(2024, 1, 2), 20_000.0), (d(2024, 1, 4), 20_100.0)]);

        let (f, b) = align_series(&fund, &bench);
        assert_eq!(f.len(), 2);
        assert_eq!(b.len(), 2);
        // Truncation keeps the most recent end of each.
        assert_eq!(f.first().unwrap().date, d(2024, 1, 3));
        assert_eq!(b.first().unwrap().date, d(2024, 1, 2));
    }

    #[test]
    fn aligning_with_empty_series_yields_empty_pair() {
        let fund = series(&[(d(2024, 1, 1), 100.0)]);
        let (f, b) = align_series(&fund, &Series::default());
        assert!(f.is_empty());
        assert!(b.is_empty());
    }
}
