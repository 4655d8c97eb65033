//! Local file I/O: the snapshot cache and CSV export.

pub mod cache;
pub mod export;
