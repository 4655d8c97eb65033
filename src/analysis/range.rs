//! Calendar-based range filtering.

use chrono::{Months, NaiveDate};

use crate::domain::{RangeSpec, Series};

/// Return the contiguous suffix of `series` with `date >= today - range`.
///
/// `RangeSpec::All` returns the series unchanged. A cutoff earlier than the
/// first sample also returns the full series. The caller supplies `today` so
/// the operation is idempotent and testable: filtering an already-filtered
/// series by the same range (and the same `today`) is a no-op.
pub fn filter_by_range(series: &Series, range: RangeSpec, today: NaiveDate) -> Series {
    let Some(months) = range.months() else {
        return series.clone();
    };

    let cutoff = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);

    let start = series.samples().partition_point(|s| s.date < cutoff);
    Series::from_sorted(series.samples()[start..].to_vec())
}
