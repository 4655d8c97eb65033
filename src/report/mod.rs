//! Comparison cards and terminal reporting.

use crate::domain::{RangeSpec, ReturnResult};

pub mod format;

pub use format::{compute_comparison, format_comparison, format_summary};

/// Fund vs benchmark return for one lookback period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodReturn {
    pub range: RangeSpec,
    pub fund: ReturnResult,
    /// `None` when the run has no benchmark at all.
    pub benchmark: Option<ReturnResult>,
}

/// Returns for every period, one row per `RangeSpec`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub periods: Vec<PeriodReturn>,
}
