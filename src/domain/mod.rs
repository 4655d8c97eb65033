//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the observation series types (`Sample`, `Series`)
//! - the lookback selector and return sentinel (`RangeSpec`, `ReturnResult`)
//! - raw wire records shared by the fetchers and the snapshot cache

pub mod types;

pub use types::*;
