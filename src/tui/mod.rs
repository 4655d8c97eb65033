//! Ratatui-based terminal UI.
//!
//! The TUI shows the scheme summary, a fund/benchmark line chart for the
//! selected range, and the per-period comparison cards. Range switching,
//! benchmark toggling, and manual cache refresh are all key-driven.

use std::io;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, SessionData};
use crate::domain::{RangeSpec, RunConfig, Series};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::NavChart;

/// Start the TUI.
pub fn run(config: RunConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::data(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::data(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::data(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: RunConfig,
    session: SessionData,
    show_benchmark: bool,
    status: String,
}

impl App {
    fn new(config: RunConfig) -> Result<Self, AppError> {
        let session = pipeline::load_session(&config)?;
        let status = match (&session.benchmark_note, session.from_cache) {
            (Some(note), _) => format!("Benchmark unavailable: {note}"),
            (None, true) => "Loaded from cache. Press r to refresh.".to_string(),
            (None, false) => "Fetched fresh data.".to_string(),
        };
        Ok(Self {
            config,
            session,
            show_benchmark: true,
            status,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::data(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::data(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::data(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Left => {
                self.config.range = cycle_range(self.config.range, -1);
                self.status = format!("Range: {}", self.config.range.display_name());
            }
            KeyCode::Right => {
                self.config.range = cycle_range(self.config.range, 1);
                self.status = format!("Range: {}", self.config.range.display_name());
            }
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(range) = range_for_digit(c) {
                    self.config.range = range;
                    self.status = format!("Range: {}", self.config.range.display_name());
                }
            }
            KeyCode::Char('b') => {
                self.show_benchmark = !self.show_benchmark;
                self.status =
                    benchmark_toggle_status(self.show_benchmark, self.session.benchmark.is_some());
            }
            KeyCode::Char('r') => match pipeline::fetch_session(&self.config) {
                Ok(session) => {
                    self.session = session;
                    self.status = match &self.session.benchmark_note {
                        Some(note) => format!("Refreshed. Benchmark unavailable: {note}"),
                        None => "Refreshed and rewrote cache.".to_string(),
                    };
                }
                Err(err) => {
                    self.status = format!("Refresh failed: {err}");
                }
            },
            _ => {}
        }

        Ok(false)
    }

    fn draw(&self, f: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(10),
                Constraint::Length(10),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.draw_header(f, chunks[0]);
        self.draw_chart(f, chunks[1]);
        self.draw_cards(f, chunks[2]);

        let status = Paragraph::new(Line::from(vec![
            Span::styled(
                " q quit | \u{2190}/\u{2192} or 1-6 range | b benchmark | r refresh  ",
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(self.status.clone()),
        ]));
        f.render_widget(status, chunks[3]);
    }

    fn draw_header(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let meta = &self.session.meta;
        let latest = self
            .session
            .fund
            .last()
            .map(|s| format!("{:.4} ({})", s.value, s.date))
            .unwrap_or_else(|| "--".to_string());

        let source = if self.session.from_cache { "cache" } else { "network" };
        let benchmark_line = match (&self.session.benchmark, &self.session.benchmark_note) {
            (Some(b), _) => format!(
                "{} ({} samples, {} dropped)",
                self.config.benchmark_symbol,
                b.len(),
                self.session.benchmark_dropped
            ),
            (None, Some(note)) => format!("unavailable ({note})"),
            (None, None) => "disabled".to_string(),
        };

        let text = vec![
            Line::from(format!("{} ({})", meta.scheme_name, meta.scheme_code)),
            Line::from(format!("{} | {}", meta.fund_house, meta.scheme_category)),
            Line::from(format!("Latest NAV: {latest}")),
            Line::from(format!(
                "Data: {} samples ({} dropped) via {source}, fetched {} | Benchmark: {benchmark_line}",
                self.session.fund.len(),
                self.session.fund_dropped,
                self.session.fetched_on,
            )),
        ];

        let header = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" navscope "),
        );
        f.render_widget(header, area);
    }

    fn draw_chart(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let today = Local::now().date_naive();
        let benchmark = if self.show_benchmark {
            self.session.benchmark.as_ref()
        } else {
            None
        };

        let (fund_view, bench_view) = match benchmark {
            Some(bench) => {
                let (fund, bench) = crate::analysis::align_series(&self.session.fund, bench);
                (fund, Some(bench))
            }
            None => (self.session.fund.clone(), None),
        };
        let (fund_window, bench_window) =
            crate::app::chart_windows(&fund_view, bench_view.as_ref(), &self.config, today);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" NAV [{}] ", self.config.range.display_name()));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let fund_points = series_points(&fund_window);
        let bench_points = bench_window
            .as_ref()
            .map(series_points)
            .unwrap_or_default();

        let Some((x_bounds, y_bounds)) = chart_bounds(&fund_points, &bench_points) else {
            let placeholder = Paragraph::new("No samples in the selected range.")
                .style(Style::default().fg(Color::Yellow));
            f.render_widget(placeholder, inner);
            return;
        };

        let chart = NavChart {
            fund: &fund_points,
            benchmark: &bench_points,
            x_bounds,
            y_bounds,
            x_label: "date",
            y_label: "NAV".to_string(),
            fmt_x: fmt_day_number,
            fmt_y: fmt_value,
        };
        f.render_widget(chart, inner);
    }

    fn draw_cards(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let today = Local::now().date_naive();
        let (fund_view, bench_view) = crate::app::aligned_views(&self.session);
        let comparison =
            crate::report::compute_comparison(&fund_view, bench_view.as_ref(), today);
        let text = crate::report::format_comparison(&comparison);

        let cards = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Returns "),
        );
        f.render_widget(cards, area);
    }
}

/// Map a series to (days-from-CE, value) points for Plotters.
fn series_points(series: &Series) -> Vec<(f64, f64)> {
    series
        .iter()
        .map(|s| (s.date.num_days_from_ce() as f64, s.value))
        .collect()
}

/// Joint bounds over both lines, with a 5% y pad.
fn chart_bounds(fund: &[(f64, f64)], bench: &[(f64, f64)]) -> Option<([f64; 2], [f64; 2])> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &(x, y) in fund.iter().chain(bench.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return None;
    }
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-6);
    Some(([x_min, x_max], [y_min - pad, y_max + pad]))
}

/// Map the digit keys 1-6 onto the periods, shortest lookback first.
fn range_for_digit(c: char) -> Option<RangeSpec> {
    let idx = c.to_digit(10)? as usize;
    RangeSpec::ALL_PERIODS.get(idx.checked_sub(1)?).copied()
}

/// Status line for the benchmark toggle. The overlay can be requested while
/// no benchmark data exists (disabled or unavailable); the message must not
/// claim a line that cannot render.
fn benchmark_toggle_status(show: bool, available: bool) -> String {
    match (show, available) {
        (false, _) => "Benchmark overlay off.".to_string(),
        (true, true) => "Benchmark overlay on.".to_string(),
        (true, false) => "Benchmark overlay on (no benchmark data to draw).".to_string(),
    }
}

fn cycle_range(range: RangeSpec, step: isize) -> RangeSpec {
    let periods = RangeSpec::ALL_PERIODS;
    let idx = periods.iter().position(|&r| r == range).unwrap_or(0) as isize;
    let n = periods.len() as isize;
    periods[((idx + step % n + n) % n) as usize]
}

fn fmt_day_number(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v as i32)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

fn fmt_value(v: f64) -> String {
    format!("{v:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_keys_select_every_period() {
        assert_eq!(range_for_digit('1'), Some(RangeSpec::M1));
        assert_eq!(range_for_digit('2'), Some(RangeSpec::M3));
        assert_eq!(range_for_digit('3'), Some(RangeSpec::M6));
        assert_eq!(range_for_digit('4'), Some(RangeSpec::Y1));
        assert_eq!(range_for_digit('5'), Some(RangeSpec::Y5));
        assert_eq!(range_for_digit('6'), Some(RangeSpec::All));
        assert_eq!(range_for_digit('0'), None);
        assert_eq!(range_for_digit('7'), None);
    }

    #[test]
    fn benchmark_toggle_status_reflects_data_absence() {
        assert_eq!(benchmark_toggle_status(true, true), "Benchmark overlay on.");
        assert_eq!(
            benchmark_toggle_status(true, false),
            "Benchmark overlay on (no benchmark data to draw)."
        );
        assert_eq!(benchmark_toggle_status(false, false), "Benchmark overlay off.");
    }

    #[test]
    fn cycle_range_wraps_both_ways() {
        assert_eq!(cycle_range(RangeSpec::M1, -1), RangeSpec::All);
        assert_eq!(cycle_range(RangeSpec::All, 1), RangeSpec::M1);
        assert_eq!(cycle_range(RangeSpec::M3, 1), RangeSpec::M6);
    }

    #[test]
    fn chart_bounds_pads_y_and_fixes_degenerate_x() {
        let fund = vec![(100.0, 10.0), (100.0, 12.0)];
        let (x, y) = chart_bounds(&fund, &[]).unwrap();
        assert!(x[1] > x[0]);
        assert!(y[0] < 10.0 && y[1] > 12.0);
    }

    #[test]
    fn chart_bounds_empty_is_none() {
        assert!(chart_bounds(&[], &[]).is_none());
    }

    #[test]
    fn day_number_formatting_round_trips() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let formatted = fmt_day_number(date.num_days_from_ce() as f64);
        assert_eq!(formatted, "2024-06");
    }
}
