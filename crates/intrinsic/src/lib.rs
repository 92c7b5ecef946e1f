#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Crate Organization
//!
//! - [`traits`] - Data model, parameters and the [`Valuator`] trait
//! - [`dcf`] - The valuation engine
//! - [`portfolio`] - Batch valuation, caching, screening and summaries

/// Version information for the intrinsic crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Data model, parameters and the [`Valuator`] trait.
pub mod traits {
    pub use intrinsic_traits::*;
}

pub use intrinsic_traits::{
    IntrinsicError, Result, StockRecord, StockSnapshot, StockValuation, Ticker,
    ValuationControls, ValuationMode, ValuationParams, ValuationResult, ValuationSignal,
    Valuator,
};

// ============================================================================
// Engine
// ============================================================================

/// The two-stage DCF engine.
///
/// The stages run in this order for every stock:
///
/// ```text
/// growth -> base value -> quality penalty -> risk premium
///        -> projection -> terminal value -> asset floor -> signal
/// ```
pub mod dcf {
    pub use intrinsic_dcf::*;
}

pub use intrinsic_dcf::DcfValuator;

// ============================================================================
// Portfolio
// ============================================================================

/// Operations over a whole snapshot.
pub mod portfolio {
    pub use intrinsic_portfolio::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use intrinsic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::DcfValuator;
    pub use crate::portfolio::{PortfolioSummary, Screen, SortDirection, SortKey, value_batch};
    pub use crate::{
        IntrinsicError, Result, StockRecord, StockSnapshot, StockValuation, ValuationControls,
        ValuationMode, ValuationParams, ValuationSignal, Valuator,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_valuator(_valuator: &dyn Valuator) {}
        _accept_valuator(&DcfValuator::default());

        let _result: Result<()> = Ok(());
        let _error = IntrinsicError::TickerNotFound("0000".to_string());
    }

    #[test]
    fn test_end_to_end() {
        let record = StockRecord {
            ticker: "9999".into(),
            price: 10.0,
            bvps: 50.0,
            ..StockRecord::default()
        };
        let out = portfolio::value_batch(
            &DcfValuator::default(),
            &[record],
            &ValuationControls::default(),
        );
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].intrinsic_value(), 35.0);
        assert_relative_eq!(out[0].margin_of_safety, 25.0 / 35.0 * 100.0, epsilon = 1e-9);
        assert_eq!(out[0].signal, ValuationSignal::Undervalued);
    }
}
