//! Earnings-quality adjustment.
//!
//! When the valuation base is earnings-derived, weak conversion of earnings
//! into free cash flow scales the base down. Financial-sector companies are
//! exempt because their cash-flow statements are not comparable.

use intrinsic_traits::stats::round_to;
use intrinsic_traits::{QualityParams, ValuationMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A base value after the earnings-quality test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityAdjustment {
    /// Base value after any penalty.
    pub base_value: f64,
    /// Factor applied to the base, rounded to 2 decimals; `None` if no penalty.
    pub penalty: Option<f64>,
}

impl QualityAdjustment {
    /// An adjustment that leaves the base untouched.
    #[must_use]
    pub const fn unchanged(base_value: f64) -> Self {
        Self {
            base_value,
            penalty: None,
        }
    }
}

/// Penalty factor for a given FCF-to-EPS conversion ratio, if any.
///
/// * conversion ≤ 0: the severe penalty
/// * 0 < conversion < threshold: `max(conversion, min_factor)`
/// * conversion ≥ threshold: none
#[must_use]
pub fn conversion_penalty(conversion: f64, params: &QualityParams) -> Option<f64> {
    if conversion <= 0.0 {
        Some(params.severe_penalty)
    } else if conversion < params.conversion_threshold {
        Some(conversion.max(params.min_factor))
    } else {
        None
    }
}

/// Apply the earnings-quality penalty to a base value.
///
/// The test runs only for earnings-based modes, positive EPS, a known FCF
/// per share, and a non-exempt sector.
#[must_use]
pub fn adjust_for_earnings_quality(
    base_value: f64,
    mode: ValuationMode,
    eps: f64,
    fcf_per_share: Option<f64>,
    sector: &str,
    params: &QualityParams,
) -> QualityAdjustment {
    let eps_positive = eps > 0.0;
    if !mode.is_earnings_based() || !eps_positive || params.is_exempt(sector) {
        return QualityAdjustment::unchanged(base_value);
    }
    let Some(fcfps) = fcf_per_share.filter(|v| v.is_finite()) else {
        return QualityAdjustment::unchanged(base_value);
    };

    let conversion = fcfps / eps;
    match conversion_penalty(conversion, params) {
        Some(factor) => {
            debug!(conversion, factor, "earnings-quality penalty applied");
            QualityAdjustment {
                base_value: base_value * factor,
                penalty: Some(round_to(factor, 2)),
            }
        }
        None => QualityAdjustment::unchanged(base_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> QualityParams {
        QualityParams::default()
    }

    #[test]
    fn test_negative_fcf_severe_penalty() {
        let adj = adjust_for_earnings_quality(
            7.25,
            ValuationMode::Eps,
            7.25,
            Some(-1.0),
            "營建",
            &params(),
        );
        assert_relative_eq!(adj.base_value, 3.625);
        assert_eq!(adj.penalty, Some(0.5));
    }

    #[test]
    fn test_zero_fcf_is_severe() {
        let adj =
            adjust_for_earnings_quality(4.0, ValuationMode::AvgEps, 5.0, Some(0.0), "電子", &params());
        assert_relative_eq!(adj.base_value, 2.0);
    }

    #[test]
    fn test_weak_conversion_uses_ratio() {
        // conversion 0.5 is above the 0.4 floor
        let adj =
            adjust_for_earnings_quality(10.0, ValuationMode::Eps, 10.0, Some(5.0), "電子", &params());
        assert_relative_eq!(adj.base_value, 5.0);
        assert_eq!(adj.penalty, Some(0.5));
    }

    #[test]
    fn test_weak_conversion_floored_factor() {
        // conversion 2.37 / 7.25 ≈ 0.327 is floored to 0.4
        let adj =
            adjust_for_earnings_quality(7.25, ValuationMode::Eps, 7.25, Some(2.37), "營建", &params());
        assert_relative_eq!(adj.base_value, 2.9, epsilon = 1e-12);
        assert_eq!(adj.penalty, Some(0.4));
    }

    #[test]
    fn test_penalty_reported_rounded() {
        let adj =
            adjust_for_earnings_quality(3.0, ValuationMode::Eps, 3.0, Some(1.357), "電子", &params());
        assert_relative_eq!(adj.base_value, 1.357, epsilon = 1e-12);
        assert_eq!(adj.penalty, Some(0.45));
    }

    #[test]
    fn test_strong_conversion_no_penalty() {
        let adj =
            adjust_for_earnings_quality(5.0, ValuationMode::Eps, 5.0, Some(3.0), "電子", &params());
        assert_relative_eq!(adj.base_value, 5.0);
        assert!(adj.penalty.is_none());
    }

    #[test]
    fn test_fcf_mode_skips_test() {
        let adj = adjust_for_earnings_quality(
            -1.0,
            ValuationMode::FcfPerShare,
            5.0,
            Some(-1.0),
            "電子",
            &params(),
        );
        assert_relative_eq!(adj.base_value, -1.0);
        assert!(adj.penalty.is_none());
    }

    #[test]
    fn test_financial_sector_exempt() {
        let adj =
            adjust_for_earnings_quality(5.0, ValuationMode::Eps, 5.0, Some(-2.0), "金融", &params());
        assert!(adj.penalty.is_none());
    }

    #[test]
    fn test_missing_inputs_skip_test() {
        let p = params();
        assert!(
            adjust_for_earnings_quality(5.0, ValuationMode::Eps, 5.0, None, "電子", &p)
                .penalty
                .is_none()
        );
        assert!(
            adjust_for_earnings_quality(5.0, ValuationMode::Eps, 0.0, Some(1.0), "電子", &p)
                .penalty
                .is_none()
        );
        assert!(
            adjust_for_earnings_quality(5.0, ValuationMode::Eps, f64::NAN, Some(1.0), "電子", &p)
                .penalty
                .is_none()
        );
    }

    #[test]
    fn test_conversion_penalty_boundaries() {
        let p = params();
        assert_eq!(conversion_penalty(0.6, &p), None);
        assert_eq!(conversion_penalty(0.59, &p), Some(0.59));
        assert_eq!(conversion_penalty(0.1, &p), Some(0.4));
        assert_eq!(conversion_penalty(-3.0, &p), Some(0.5));
    }
}
