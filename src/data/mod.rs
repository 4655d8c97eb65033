//! Upstream data collaborators.
//!
//! The analysis core never performs I/O; these clients fetch raw records and
//! hand them to `analysis::normalize_*`. Both endpoints are public and need
//! no API key.

pub mod mfapi;
pub mod yahoo;

pub use mfapi::{FundFetch, MfApiClient};
pub use yahoo::YahooClient;
