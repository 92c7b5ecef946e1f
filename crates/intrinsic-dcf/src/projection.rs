//! Two-stage cash-flow projection.
//!
//! Growth holds at the initial rate through the fade start year, then fades
//! linearly to the terminal growth rate. Each year's growth is reduced by the
//! share dilution rate and clamped to the effective bounds before compounding.

use intrinsic_traits::ProjectionParams;
use serde::{Deserialize, Serialize};

/// One projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedYear {
    /// Year index, starting at 1.
    pub year: u32,
    /// Growth before dilution (%).
    pub growth: f64,
    /// Growth after dilution and clamping (%).
    pub effective_growth: f64,
    /// Per-share value at the end of the year, undiscounted.
    pub value: f64,
    /// Present value of that year's value.
    pub present_value: f64,
}

/// The projected cash flows and their discounted sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Year-by-year detail.
    pub years: Vec<ProjectedYear>,
    /// Sum of the yearly present values.
    pub present_value: f64,
    /// Undiscounted value in the final year, the base for the terminal value.
    pub final_year_value: f64,
}

/// Growth for a given year before dilution.
///
/// Years up to `fade_start_year` keep the initial rate; afterwards the rate
/// moves linearly toward the terminal rate over `fade_years` and holds there.
#[must_use]
pub fn period_growth(year: u32, initial_growth: f64, params: &ProjectionParams) -> f64 {
    if year <= params.fade_start_year {
        return initial_growth;
    }
    let fade_years = params.fade_years.max(1);
    let fade_ratio = (f64::from(year - params.fade_start_year) / f64::from(fade_years)).min(1.0);
    initial_growth - (initial_growth - params.terminal_growth_rate) * fade_ratio
}

/// Discount factor `(1 + rate/100)^year`.
#[must_use]
pub fn discount_factor(rate: f64, year: u32) -> f64 {
    (1.0 + rate / 100.0).powi(year as i32)
}

/// Project and discount per-share cash flows.
///
/// `base_value` is expected to be positive; the caller routes non-positive
/// bases to the asset floor instead.
#[must_use]
pub fn project_cash_flows(
    base_value: f64,
    initial_growth: f64,
    discount_rate: f64,
    years: u32,
    dilution_rate: f64,
    params: &ProjectionParams,
) -> Projection {
    let mut value = base_value;
    let mut present_value = 0.0;
    let mut detail = Vec::with_capacity(years as usize);

    for year in 1..=years {
        let growth = period_growth(year, initial_growth, params);
        let effective_growth = (growth - dilution_rate)
            .max(params.effective_growth_min)
            .min(params.effective_growth_max);

        value *= 1.0 + effective_growth / 100.0;
        let pv = value / discount_factor(discount_rate, year);
        present_value += pv;

        detail.push(ProjectedYear {
            year,
            growth,
            effective_growth,
            value,
            present_value: pv,
        });
    }

    Projection {
        years: detail,
        present_value,
        final_year_value: value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> ProjectionParams {
        ProjectionParams::default()
    }

    #[test]
    fn test_period_growth_stages() {
        let p = params();
        assert_relative_eq!(period_growth(1, 10.0, &p), 10.0);
        assert_relative_eq!(period_growth(5, 10.0, &p), 10.0);
        assert_relative_eq!(period_growth(6, 10.0, &p), 8.4, epsilon = 1e-12);
        assert_relative_eq!(period_growth(8, 10.0, &p), 5.2, epsilon = 1e-12);
        assert_relative_eq!(period_growth(10, 10.0, &p), 2.0);
    }

    #[test]
    fn test_period_growth_holds_after_fade() {
        let p = params();
        assert_relative_eq!(period_growth(12, 10.0, &p), 2.0);
        assert_relative_eq!(period_growth(15, -5.0, &p), 2.0);
    }

    #[test]
    fn test_negative_growth_fades_up() {
        assert_relative_eq!(period_growth(7, -5.0, &params()), -2.2, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_growth_zero_discount() {
        let proj = project_cash_flows(5.0, 0.0, 0.0, 10, 0.0, &params());
        // growth fades from 0 to 2 after year 5, so only the first years are flat
        assert_relative_eq!(proj.years[4].value, 5.0);
        assert!(proj.final_year_value > 5.0);
        let sum: f64 = proj.years.iter().map(|y| y.value).sum();
        assert_relative_eq!(proj.present_value, sum, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_growth_compounds_and_discounts() {
        let mut p = params();
        p.terminal_growth_rate = 10.0;
        let proj = project_cash_flows(1.0, 10.0, 10.0, 3, 0.0, &p);
        assert_relative_eq!(proj.final_year_value, 1.331, epsilon = 1e-12);
        // growth equals discount rate: every year is worth the base today
        assert_relative_eq!(proj.present_value, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dilution_reduces_growth() {
        let proj = project_cash_flows(5.53, -5.0, 10.0, 10, 2.78, &params());
        assert_relative_eq!(proj.years[0].effective_growth, -7.78, epsilon = 1e-12);
        assert_relative_eq!(proj.years[9].effective_growth, 2.0 - 2.78, epsilon = 1e-12);
    }

    #[test]
    fn test_effective_growth_clamped() {
        let proj = project_cash_flows(1.0, 40.0, 10.0, 10, 0.0, &params());
        assert_relative_eq!(proj.years[0].effective_growth, 25.0);
        assert_relative_eq!(proj.years[0].growth, 40.0);

        let proj = project_cash_flows(1.0, -5.0, 10.0, 1, 20.0, &params());
        assert_relative_eq!(proj.years[0].effective_growth, -15.0);
    }

    #[test]
    fn test_zero_horizon() {
        let proj = project_cash_flows(3.0, 8.0, 10.0, 0, 0.0, &params());
        assert!(proj.years.is_empty());
        assert_relative_eq!(proj.present_value, 0.0);
        assert_relative_eq!(proj.final_year_value, 3.0);
    }
}
