//! Growth rate normalization.
//!
//! A raw growth rate is clamped to the global bounds, dampened by the
//! caller's growth discount, and finally capped by the sustainable growth
//! rate implied by return on equity and the payout ratio.

use intrinsic_traits::GrowthParams;
use intrinsic_traits::stats::{finite_or_zero, round_to};
use serde::{Deserialize, Serialize};

/// Inputs to growth normalization. Missing values should be passed as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthInputs {
    /// Raw growth rate (%).
    pub raw_growth: f64,
    /// Growth discount factor (%), 100 leaves growth unchanged.
    pub growth_discount: f64,
    /// Return on equity (%).
    pub roe: f64,
    /// Current earnings per share.
    pub eps: f64,
    /// Market price per share.
    pub price: f64,
    /// Dividend yield (%).
    pub dividend_yield: f64,
}

/// Result of growth normalization, with the intermediate figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGrowth {
    /// Raw growth after clamping to the global bounds.
    pub capped: f64,
    /// Capped growth times the growth discount, 1 decimal.
    pub discounted: f64,
    /// Sustainable growth rate, when ROE and EPS are both positive.
    pub sustainable: Option<f64>,
    /// The growth rate to project with (%, 1 decimal).
    pub rate: f64,
}

/// Payout ratio implied by dividend yield, price and EPS, capped at 1.
///
/// Both yield and the result are expressed so that `yield × price / (eps × 100)`
/// is the fraction of earnings paid out.
#[must_use]
pub fn payout_ratio(dividend_yield: f64, price: f64, eps: f64) -> f64 {
    ((dividend_yield * price) / (eps * 100.0)).min(1.0)
}

/// Normalize a raw growth rate.
///
/// # Example
///
/// ```
/// use intrinsic_dcf::growth::{normalize_growth, GrowthInputs};
/// use intrinsic_traits::GrowthParams;
///
/// let inputs = GrowthInputs { raw_growth: 30.0, growth_discount: 80.0, ..Default::default() };
/// let g = normalize_growth(&inputs, &GrowthParams::default());
/// assert_eq!(g.capped, 15.0);
/// assert_eq!(g.rate, 12.0);
/// ```
#[must_use]
pub fn normalize_growth(inputs: &GrowthInputs, params: &GrowthParams) -> NormalizedGrowth {
    let raw = finite_or_zero(inputs.raw_growth);
    let factor = finite_or_zero(inputs.growth_discount) / 100.0;
    let roe = finite_or_zero(inputs.roe);
    let eps = finite_or_zero(inputs.eps);
    let price = finite_or_zero(inputs.price);
    let dividend_yield = finite_or_zero(inputs.dividend_yield);

    let capped = raw.max(params.min).min(params.max);
    let discounted = round_to(capped * factor, 1);

    let sustainable = (roe > 0.0 && eps > 0.0)
        .then(|| roe * (1.0 - payout_ratio(dividend_yield, price, eps)));

    let rate = match sustainable {
        Some(sgr) => round_to(discounted.min(sgr * params.sustainable_flex), 1),
        None => discounted,
    };

    NormalizedGrowth {
        capped,
        discounted,
        sustainable,
        rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> GrowthParams {
        GrowthParams::default()
    }

    #[test]
    fn test_clamp_and_discount_only() {
        let inputs = GrowthInputs {
            raw_growth: 10.4,
            growth_discount: 80.0,
            ..Default::default()
        };
        let g = normalize_growth(&inputs, &params());
        assert_relative_eq!(g.capped, 10.4);
        assert_relative_eq!(g.discounted, 8.3);
        assert!(g.sustainable.is_none());
        assert_relative_eq!(g.rate, 8.3);
    }

    #[test]
    fn test_lower_clamp() {
        let inputs = GrowthInputs {
            raw_growth: -40.0,
            growth_discount: 100.0,
            ..Default::default()
        };
        let g = normalize_growth(&inputs, &params());
        assert_relative_eq!(g.rate, -5.0);
    }

    #[test]
    fn test_sustainable_growth_caps_rate() {
        let inputs = GrowthInputs {
            raw_growth: 10.4,
            growth_discount: 80.0,
            roe: 25.6,
            eps: 7.88,
            price: 120.5,
            dividend_yield: 5.2,
        };
        let g = normalize_growth(&inputs, &params());
        let sgr = g.sustainable.unwrap();
        assert_relative_eq!(sgr, 25.6 * (1.0 - 626.6 / 788.0), epsilon = 1e-9);
        assert_relative_eq!(g.rate, 6.3);
    }

    #[test]
    fn test_sustainable_growth_not_binding() {
        let inputs = GrowthInputs {
            raw_growth: 5.0,
            growth_discount: 100.0,
            roe: 20.0,
            eps: 5.0,
            price: 50.0,
            dividend_yield: 2.0,
        };
        let g = normalize_growth(&inputs, &params());
        // payout = 100 / 500 = 0.2, sgr = 16, flexed 19.2 > 5
        assert_relative_eq!(g.sustainable.unwrap(), 16.0, epsilon = 1e-12);
        assert_relative_eq!(g.rate, 5.0);
    }

    #[test]
    fn test_full_payout_zeroes_sustainable_growth() {
        let inputs = GrowthInputs {
            raw_growth: 8.0,
            growth_discount: 100.0,
            roe: 12.0,
            eps: 1.0,
            price: 100.0,
            dividend_yield: 9.0,
        };
        let g = normalize_growth(&inputs, &params());
        assert_relative_eq!(g.sustainable.unwrap(), 0.0);
        assert_relative_eq!(g.rate, 0.0);
    }

    #[test]
    fn test_negative_roe_skips_constraint() {
        let inputs = GrowthInputs {
            raw_growth: 12.0,
            growth_discount: 50.0,
            roe: -3.0,
            eps: 2.0,
            price: 30.0,
            dividend_yield: 1.0,
        };
        let g = normalize_growth(&inputs, &params());
        assert!(g.sustainable.is_none());
        assert_relative_eq!(g.rate, 6.0);
    }

    #[test]
    fn test_nan_inputs_are_zero() {
        let inputs = GrowthInputs {
            raw_growth: f64::NAN,
            growth_discount: 80.0,
            roe: f64::NAN,
            eps: f64::NAN,
            price: f64::NAN,
            dividend_yield: f64::NAN,
        };
        let g = normalize_growth(&inputs, &params());
        assert_relative_eq!(g.rate, 0.0);
        assert!(g.sustainable.is_none());
    }

    #[test]
    fn test_payout_ratio_capped() {
        assert_relative_eq!(payout_ratio(50.0, 100.0, 1.0), 1.0);
        assert_relative_eq!(payout_ratio(4.0, 50.0, 4.0), 0.5);
    }
}
