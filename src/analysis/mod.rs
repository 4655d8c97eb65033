//! Time-series analysis core: normalization, range filtering, period returns,
//! and cross-series alignment.
//!
//! Everything in here is pure and synchronous over already-materialized
//! in-memory series. Fetching, caching, and rendering live elsewhere; the
//! analysis functions take the immutable series as an explicit argument on
//! every call and never hold cross-call state.

pub mod align;
pub mod normalize;
pub mod range;
pub mod returns;

pub use align::align_series;
pub use normalize::{normalize, normalize_fund, normalize_quotes};
pub use range::filter_by_range;
pub use returns::{rebase, return_over};
