#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core data model and trait definitions for the Intrinsic valuation engine.
//!
//! This crate provides the records the engine consumes, the parameters it is
//! configured with, the results it produces, and the [`Valuator`] trait.

/// The version of the intrinsic-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod params;
pub mod stats;
pub mod types;
pub mod valuator;

// Re-exports
pub use error::{IntrinsicError, Result};
pub use params::{
    ChecklistThresholds, ExitMultiples, GrowthParams, ProjectionParams, QualityParams,
    RiskFactor, RiskParams, SignalThresholds, ValuationParams,
};
pub use types::{
    StockRecord, StockSnapshot, StockValuation, Ticker, ValuationControls, ValuationMode,
    ValuationResult, ValuationSignal,
};
pub use valuator::Valuator;
