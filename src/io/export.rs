//! Export filtered series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per date, NAV column, optional benchmark column.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Series;
use crate::error::AppError;

/// Write a series (optionally with an aligned benchmark) to a CSV file.
///
/// When a benchmark is supplied it must already be aligned to the fund series
/// (equal length, matching dates per index); handing in unaligned series is a
/// programmer error and fails loudly.
pub fn write_series_csv(
    path: &Path,
    fund: &Series,
    benchmark: Option<&Series>,
) -> Result<(), AppError> {
    if let Some(bench) = benchmark {
        if bench.len() != fund.len() {
            return Err(AppError::config(format!(
                "Export requires aligned series: fund has {} samples, benchmark {}.",
                fund.len(),
                bench.len()
            )));
        }
    }

    let mut file = File::create(path).map_err(|e| {
        AppError::config(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    let header = match benchmark {
        Some(_) => "date,nav,benchmark_close",
        None => "date,nav",
    };
    writeln!(file, "{header}")
        .map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;

    for (i, s) in fund.iter().enumerate() {
        match benchmark {
            Some(bench) => writeln!(
                file,
                "{},{:.4},{:.4}",
                s.date,
                s.value,
                bench.samples()[i].value
            ),
            None => writeln!(file, "{},{:.4}", s.date, s.value),
        }
        .map_err(|e| AppError::config(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
