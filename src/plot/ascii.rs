//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - fund NAV: `*` polyline
//! - benchmark overlay: `+` polyline (drawn first so the fund wins overlaps)

use chrono::NaiveDate;

use crate::domain::Series;

/// Render a fund series, with an optional benchmark overlay, as a text chart.
///
/// Both series should already be range-filtered; when a benchmark is present
/// the caller is expected to have rebased it onto the fund's scale (see
/// [`crate::analysis::rebase`]), otherwise the fund line degenerates into a
/// flat band at the bottom of the index's range.
pub fn render_ascii_chart(
    fund: &Series,
    benchmark: Option<&Series>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max)) = date_range(fund, benchmark) else {
        return "Chart: no samples in range\n".to_string();
    };
    let Some((y_min, y_max)) = value_range(fund, benchmark) else {
        return "Chart: no samples in range\n".to_string();
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    if let Some(bench) = benchmark {
        draw_series(&mut grid, bench, x_min, x_max, y_min, y_max, '+');
    }
    draw_series(&mut grid, fund, x_min, x_max, y_min, y_max, '*');

    let mut out = String::new();
    out.push_str(&format!(
        "Chart: {} .. {} | value=[{y_min:.2}, {y_max:.2}]\n",
        from_day_number(x_min),
        from_day_number(x_max),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn day_number(date: NaiveDate) -> i64 {
    chrono::Datelike::num_days_from_ce(&date) as i64
}

fn from_day_number(n: i64) -> NaiveDate {
    NaiveDate::from_num_days_from_ce_opt(n as i32).unwrap_or(NaiveDate::MIN)
}

fn date_range(fund: &Series, benchmark: Option<&Series>) -> Option<(i64, i64)> {
    let mut min_x = i64::MAX;
    let mut max_x = i64::MIN;
    for s in fund.iter().chain(benchmark.into_iter().flat_map(|b| b.iter())) {
        let x = day_number(s.date);
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x <= max_x && min_x != i64::MAX {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn value_range(fund: &Series, benchmark: Option<&Series>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for s in fund.iter().chain(benchmark.into_iter().flat_map(|b| b.iter())) {
        min_y = min_y.min(s.value);
        max_y = max_y.max(s.value);
    }
    if min_y.is_finite() && max_y.is_finite() {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: i64, x_min: i64, x_max: i64, width: usize) -> usize {
    let width = width.max(2);
    let span = (x_max - x_min).max(1) as f64;
    let u = ((x - x_min) as f64 / span).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_series(
    grid: &mut [Vec<char>],
    series: &Series,
    x_min: i64,
    x_max: i64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev: Option<(usize, usize)> = None;
    for s in series.iter() {
        let x = map_x(day_number(s.date), x_min, x_max, width);
        let y = map_y(s.value, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, ch);
        } else {
            grid[y][x] = ch;
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written so an
/// earlier series is never clobbered mid-segment.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;

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
    fn chart_golden_snapshot_small() {
        let fund = series(&[(d(2024, 1, 1), 100.0), (d(2024, 1, 10), 110.0)]);
        let txt = render_ascii_chart(&fund, None, 10, 5);

        let expected = concat!(
            "Chart: 2024-01-01 .. 2024-01-10 | value=[99.50, 110.50]\n",
            "        **\n",
            "      **  \n",
            "    **    \n",
            "  **      \n",
            "**        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_series_renders_placeholder() {
        let txt = render_ascii_chart(&Series::default(), None, 40, 10);
        assert_eq!(txt, "Chart: no samples in range\n");
    }

    #[test]
    fn benchmark_overlay_uses_plus_marks() {
        let fund = series(&[(d(2024, 1, 1), 100.0), (d(2024, 1, 10), 110.0)]);
        let bench = series(&[(d(2024, 1, 1), 110.0), (d(2024, 1, 10), 100.0)]);
        let txt = render_ascii_chart(&fund, Some(&bench), 20, 8);
        assert!(txt.contains('*'));
        assert!(txt.contains('+'));
    }
}
