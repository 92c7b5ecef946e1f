//! Risk premium estimation.
//!
//! Three independent signals each add a capped, monotonic premium to the
//! discount rate once they cross a threshold: leverage (debt-to-equity),
//! liquidity (current ratio) and earnings volatility (coefficient of
//! variation of historical EPS).

use intrinsic_traits::RiskParams;
use intrinsic_traits::stats::{Dispersion, round_to};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Balance-sheet ratios feeding the risk premium. Either may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    /// Debt-to-equity ratio.
    pub debt_to_equity: Option<f64>,
    /// Current ratio.
    pub current_ratio: Option<f64>,
}

impl Financials {
    /// Financials with both ratios known.
    #[must_use]
    pub const fn new(debt_to_equity: f64, current_ratio: f64) -> Self {
        Self {
            debt_to_equity: Some(debt_to_equity),
            current_ratio: Some(current_ratio),
        }
    }
}

/// The risk premium and its components, in percentage points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskPremium {
    /// Contribution from leverage.
    pub leverage: f64,
    /// Contribution from weak liquidity.
    pub liquidity: f64,
    /// Contribution from earnings volatility.
    pub volatility: f64,
    /// Coefficient of variation of historical EPS, when it could be computed.
    pub earnings_cv: Option<f64>,
    /// Sum of the contributions, rounded to 2 decimals.
    pub total: f64,
}

/// Estimate the additive risk premium.
///
/// # Example
///
/// ```
/// use intrinsic_dcf::risk::{estimate_risk_premium, Financials};
/// use intrinsic_traits::RiskParams;
///
/// let premium = estimate_risk_premium(&Financials::new(1.0, 2.0), &[], &RiskParams::default());
/// assert_eq!(premium.total, 1.5);
/// ```
#[must_use]
pub fn estimate_risk_premium(
    financials: &Financials,
    historical_eps: &[f64],
    params: &RiskParams,
) -> RiskPremium {
    let leverage = match financials.debt_to_equity {
        Some(de) if de > params.leverage.threshold => {
            params.leverage.premium(de - params.leverage.threshold)
        }
        _ => 0.0,
    };

    let liquidity = match financials.current_ratio {
        Some(cr) if cr < params.liquidity.threshold => {
            params.liquidity.premium(params.liquidity.threshold - cr)
        }
        _ => 0.0,
    };

    // only finite entries count towards the required history
    let earnings_cv = Dispersion::of(historical_eps)
        .filter(|d| d.count >= params.min_history)
        .and_then(|d| d.coefficient_of_variation(params.min_abs_mean));

    let volatility = match earnings_cv {
        Some(cv) if cv > params.volatility.threshold => params.volatility.premium(cv),
        _ => 0.0,
    };

    let total = round_to(leverage + liquidity + volatility, 2);
    if total > 0.0 {
        debug!(leverage, liquidity, volatility, total, "risk premium added");
    }

    RiskPremium {
        leverage,
        liquidity,
        volatility,
        earnings_cv,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> RiskParams {
        RiskParams::default()
    }

    #[test]
    fn test_healthy_company_no_premium() {
        let p = estimate_risk_premium(
            &Financials::new(0.07, 1.54),
            &[6.0, 6.91, 7.36, 7.5],
            &params(),
        );
        assert_relative_eq!(p.total, 0.0);
        assert!(p.earnings_cv.unwrap() < 0.1);
    }

    #[test]
    fn test_leverage_and_liquidity() {
        let p = estimate_risk_premium(&Financials::new(1.36, 0.95), &[], &params());
        assert_relative_eq!(p.leverage, (1.36 - 0.5) * 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.liquidity, (1.5 - 0.95) * 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.total, 3.68);
    }

    #[test]
    fn test_caps() {
        let p = estimate_risk_premium(&Financials::new(10.0, 0.0), &[], &params());
        assert_relative_eq!(p.leverage, 4.0);
        assert_relative_eq!(p.liquidity, 2.0);
        assert_relative_eq!(p.total, 6.0);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let p = estimate_risk_premium(&Financials::new(0.5, 1.5), &[], &params());
        assert_relative_eq!(p.total, 0.0);
    }

    #[test]
    fn test_unknown_financials() {
        let p = estimate_risk_premium(&Financials::default(), &[], &params());
        assert_relative_eq!(p.total, 0.0);
        assert!(p.earnings_cv.is_none());
    }

    #[test]
    fn test_volatility_premium() {
        // mean 2, population std 1
        let eps = [1.0, 3.0, 1.0, 3.0];
        let p = estimate_risk_premium(&Financials::default(), &eps, &params());
        assert_relative_eq!(p.earnings_cv.unwrap(), 0.5);
        assert_relative_eq!(p.volatility, 1.5);
        assert_relative_eq!(p.total, 1.5);
    }

    #[test]
    fn test_volatility_premium_capped() {
        let eps = [0.1, 5.0, 0.1, 0.1];
        let p = estimate_risk_premium(&Financials::default(), &eps, &params());
        assert!(p.earnings_cv.unwrap() > 1.0);
        assert_relative_eq!(p.volatility, 3.0);
    }

    #[test]
    fn test_volatility_needs_history() {
        let p = estimate_risk_premium(&Financials::default(), &[1.0, 3.0], &params());
        assert!(p.earnings_cv.is_none());
        assert_relative_eq!(p.volatility, 0.0);
    }

    #[test]
    fn test_volatility_ignores_non_finite_history() {
        let eps = [f64::NAN, f64::NAN, 1.0, 3.0];
        let p = estimate_risk_premium(&Financials::default(), &eps, &params());
        assert!(p.earnings_cv.is_none());
        assert_relative_eq!(p.volatility, 0.0);

        let eps = [f64::NAN, 1.0, 3.0, 1.0, 3.0];
        let p = estimate_risk_premium(&Financials::default(), &eps, &params());
        assert_relative_eq!(p.earnings_cv.unwrap(), 0.5);
    }

    #[test]
    fn test_volatility_skips_zero_mean() {
        let p = estimate_risk_premium(&Financials::default(), &[-2.0, 2.0, -2.0, 2.0], &params());
        assert!(p.earnings_cv.is_none());
        assert_relative_eq!(p.total, 0.0);
    }

    #[test]
    fn test_total_rounded() {
        let p = estimate_risk_premium(&Financials::new(0.5011, 2.0), &[], &params());
        assert_relative_eq!(p.leverage, 0.0033, epsilon = 1e-9);
        assert_relative_eq!(p.total, 0.0);
    }
}
