//! Terminal value selection.
//!
//! The value beyond the projection horizon is estimated twice, with the
//! Gordon growth perpetuity and with a sector exit multiple, and the smaller
//! of the two is used. The estimates are never blended.

use crate::projection::discount_factor;
use intrinsic_traits::ProjectionParams;
use serde::{Deserialize, Serialize};

/// Both terminal-value estimates and the selected figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminalValue {
    /// Final-year value grown one year at the terminal rate.
    pub forward_cash_flow: f64,
    /// Discount rate minus terminal growth, floored at the minimum spread.
    pub spread: f64,
    /// Gordon growth (perpetuity) estimate.
    pub gordon: f64,
    /// Sector exit-multiple estimate.
    pub exit_multiple: f64,
    /// `min(gordon, exit_multiple)`.
    pub value: f64,
    /// Selected value discounted to today.
    pub discounted: f64,
}

/// Compute both terminal values, select the more conservative one and
/// discount it over `years`.
///
/// # Example
///
/// ```
/// use intrinsic_dcf::terminal::select_terminal_value;
/// use intrinsic_traits::ProjectionParams;
///
/// let tv = select_terminal_value(10.0, 10.0, 10, 16.0, &ProjectionParams::default());
/// assert!(tv.value <= tv.gordon && tv.value <= tv.exit_multiple);
/// ```
#[must_use]
pub fn select_terminal_value(
    final_year_value: f64,
    discount_rate: f64,
    years: u32,
    exit_multiple: f64,
    params: &ProjectionParams,
) -> TerminalValue {
    let forward_cash_flow = final_year_value * (1.0 + params.terminal_growth_rate / 100.0);
    let spread = (discount_rate - params.terminal_growth_rate).max(params.min_spread);

    let gordon = forward_cash_flow / (spread / 100.0);
    let exit = forward_cash_flow * exit_multiple;
    let value = gordon.min(exit);

    TerminalValue {
        forward_cash_flow,
        spread,
        gordon,
        exit_multiple: exit,
        value,
        discounted: value / discount_factor(discount_rate, years),
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
    fn test_gordon_binds_for_high_multiple() {
        // spread 8 gives an implied multiple of 12.5, below the exit multiple
        let tv = select_terminal_value(1.0, 10.0, 10, 16.0, &params());
        assert_relative_eq!(tv.forward_cash_flow, 1.02);
        assert_relative_eq!(tv.spread, 8.0);
        assert_relative_eq!(tv.gordon, 12.75, epsilon = 1e-12);
        assert_relative_eq!(tv.exit_multiple, 16.32, epsilon = 1e-12);
        assert_relative_eq!(tv.value, tv.gordon);
    }

    #[test]
    fn test_exit_multiple_binds_for_low_multiple() {
        let tv = select_terminal_value(1.0, 10.0, 10, 8.0, &params());
        assert_relative_eq!(tv.value, 8.16, epsilon = 1e-12);
        assert_relative_eq!(tv.value, tv.exit_multiple);
    }

    #[test]
    fn test_min_spread_floor() {
        let tv = select_terminal_value(1.0, 3.0, 10, 100.0, &params());
        assert_relative_eq!(tv.spread, 3.0);
        assert_relative_eq!(tv.gordon, 34.0, epsilon = 1e-12);

        let tv = select_terminal_value(1.0, -4.0, 10, 100.0, &params());
        assert_relative_eq!(tv.spread, 3.0);
    }

    #[test]
    fn test_discounting() {
        let tv = select_terminal_value(1.0, 10.0, 10, 12.0, &params());
        assert_relative_eq!(tv.discounted, tv.value / 1.1_f64.powi(10), epsilon = 1e-12);
    }
}
