//! Read/write snapshot cache files.
//!
//! A snapshot is the "portable" representation of one fetch session:
//! - scheme metadata
//! - raw fund NAV records (unnormalized, exactly as fetched)
//! - raw benchmark quotes, when the benchmark fetch succeeded
//! - the date the data was fetched
//!
//! The cache is deliberately dumb: one JSON file per scheme, used when
//! present, rewritten after every successful fetch, and bypassed only by an
//! explicit refresh (`--refresh` flag or the TUI refresh key). There is no
//! age-based invalidation.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{FundMeta, RawFundRecord, RawQuote};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tool: String,
    pub fetched_on: NaiveDate,
    pub meta: FundMeta,
    pub fund: Vec<RawFundRecord>,
    pub benchmark_symbol: Option<String>,
    pub benchmark: Option<Vec<RawQuote>>,
}

/// Cache file location for a scheme.
pub fn snapshot_path(cache_dir: &Path, scheme_code: u32) -> PathBuf {
    cache_dir.join(format!("scheme-{scheme_code}.json"))
}

/// Write a snapshot, creating the cache directory if needed.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config(format!(
                "Failed to create cache directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        AppError::config(format!("Failed to create snapshot '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, snapshot)
        .map_err(|e| AppError::config(format!("Failed to write snapshot: {e}")))?;

    Ok(())
}

/// Read a snapshot file.
pub fn read_snapshot(path: &Path) -> Result<Snapshot, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::config(format!("Failed to open snapshot '{}': {e}", path.display()))
    })?;
    let snapshot: Snapshot = serde_json::from_reader(file)
        .map_err(|e| AppError::config(format!("Invalid snapshot '{}': {e}", path.display())))?;
    Ok(snapshot)
}
