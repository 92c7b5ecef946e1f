//! Discounted-cash-flow valuation engine.
//!
//! This crate turns a [`StockRecord`](intrinsic_traits::StockRecord) into an
//! intrinsic value per share through a fixed pipeline:
//! - Growth: raw growth clamped, dampened and capped by sustainable growth
//! - Quality: earnings-based bases scaled down for weak free-cash-flow conversion
//! - Risk: capped premia for leverage, liquidity and earnings volatility
//! - Projection: five years at the initial rate, then a linear fade
//! - Terminal value: the lower of Gordon growth and the sector exit multiple
//! - Floor: a fraction of book value per share
//!
//! Every operation is total. Missing or non-finite inputs are normalized, and
//! a non-positive base value falls through to the asset floor.
//!
//! # Example
//!
//! ```
//! use intrinsic_dcf::DcfValuator;
//! use intrinsic_traits::{StockRecord, ValuationControls, Valuator};
//!
//! let record = StockRecord {
//!     ticker: "6214".into(),
//!     price: 120.0,
//!     eps: 7.88,
//!     bvps: 30.83,
//!     growth_rate: 10.4,
//!     ..Default::default()
//! };
//! let valuation = DcfValuator::default().value(&record, &ValuationControls::default());
//! println!("{}: {:.2} ({})", valuation.ticker(), valuation.intrinsic_value(), valuation.signal);
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod base;
pub mod checklist;
pub mod dcf;
pub mod floor;
pub mod growth;
pub mod projection;
pub mod quality;
pub mod risk;
pub mod scenario;
pub mod signal;
pub mod terminal;
pub mod valuator;

// Re-export key types
pub use base::{BaseSource, BaseValue, select_base_value};
pub use checklist::{CheckItem, Checklist, Criterion, evaluate_checklist};
pub use dcf::{DcfBreakdown, DcfOptions, DcfValuation, calc_intrinsic_value, calc_intrinsic_value_detailed};
pub use risk::{Financials, RiskPremium};
pub use scenario::{Scenario, ScenarioKind, Scenarios, analyze_scenarios};
pub use signal::{classify, margin_of_safety};
pub use valuator::{DcfValuator, PipelineTrace};
