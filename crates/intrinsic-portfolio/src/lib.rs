//! Portfolio-level operations for the Intrinsic valuation engine.
//!
//! Valuing a single stock is the job of a [`Valuator`](intrinsic_traits::Valuator);
//! this crate applies one to a whole snapshot:
//! - Batch: parallel valuation that skips records with fetch errors
//! - Cache: memoized batches keyed on snapshot and controls
//! - Summary: signal counts and portfolio averages
//! - Screen: sector filter, search and sorting

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod cache;
pub mod screen;
pub mod summary;

pub use batch::value_batch;
pub use cache::{CacheKey, ValuationCache};
pub use screen::{Screen, SortDirection, SortKey};
pub use summary::{PortfolioSummary, distinct_sectors};
