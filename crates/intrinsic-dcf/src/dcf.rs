//! Two-stage DCF with risk premia, conservative terminal value and asset floor.
//!
//! [`calc_intrinsic_value`] composes the individual stages:
//!
//! 1. risk premium from leverage, liquidity and earnings volatility
//! 2. cash-flow projection at the risk-adjusted discount rate
//! 3. terminal value as the lower of Gordon growth and the sector exit multiple
//! 4. asset floor at a fraction of book value per share
//!
//! A base value that is not a positive finite number skips straight to the
//! floor.

use crate::floor::{apply_asset_floor, asset_floor};
use crate::projection::{Projection, project_cash_flows};
use crate::risk::{Financials, RiskPremium, estimate_risk_premium};
use crate::terminal::{TerminalValue, select_terminal_value};
use intrinsic_traits::stats::{finite_or_zero, round_to};
use intrinsic_traits::{StockRecord, ValuationParams, ValuationResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-stock inputs to the DCF beyond base value, growth and discount rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DcfOptions {
    /// Sector name used to look up the exit multiple.
    pub sector: Option<String>,
    /// Balance-sheet ratios for the risk premium.
    pub financials: Financials,
    /// Historical EPS, oldest first.
    pub historical_eps: Vec<f64>,
    /// Projection horizon; the configured horizon when `None`.
    pub years: Option<u32>,
    /// Annual share dilution (%), negative for buybacks.
    pub share_dilution_rate: f64,
    /// Book value per share for the asset floor.
    pub bvps: Option<f64>,
}

impl DcfOptions {
    /// Set the sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Set debt-to-equity and current ratio.
    #[must_use]
    pub const fn with_financials(mut self, debt_to_equity: f64, current_ratio: f64) -> Self {
        self.financials = Financials::new(debt_to_equity, current_ratio);
        self
    }

    /// Set the historical EPS series.
    #[must_use]
    pub fn with_historical_eps(mut self, eps: impl Into<Vec<f64>>) -> Self {
        self.historical_eps = eps.into();
        self
    }

    /// Override the projection horizon.
    #[must_use]
    pub const fn with_years(mut self, years: u32) -> Self {
        self.years = Some(years);
        self
    }

    /// Set the share dilution rate.
    #[must_use]
    pub const fn with_dilution(mut self, rate: f64) -> Self {
        self.share_dilution_rate = rate;
        self
    }

    /// Set book value per share.
    #[must_use]
    pub const fn with_bvps(mut self, bvps: f64) -> Self {
        self.bvps = Some(bvps);
        self
    }
}

impl From<&StockRecord> for DcfOptions {
    /// Options for a record.
    ///
    /// Upstream writes missing ratios as zero. A zero current ratio still
    /// counts as illiquid; a zero debt-to-equity or book value is unknown.
    fn from(record: &StockRecord) -> Self {
        let known = |v: f64| (v.is_finite() && v > 0.0).then_some(v);
        Self {
            sector: (!record.sector.is_empty()).then(|| record.sector.clone()),
            financials: Financials {
                debt_to_equity: known(record.debt_to_equity),
                current_ratio: Some(finite_or_zero(record.current_ratio)),
            },
            historical_eps: record.historical_eps.clone(),
            years: None,
            share_dilution_rate: record.share_dilution_rate.map_or(0.0, finite_or_zero),
            bvps: known(record.bvps),
        }
    }
}

/// Intermediate figures of a full DCF run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfBreakdown {
    /// Risk premium components.
    pub risk: RiskPremium,
    /// Year-by-year projection.
    pub projection: Projection,
    /// Terminal value estimates.
    pub terminal: TerminalValue,
    /// Projected plus discounted terminal value, before the floor.
    pub pre_floor_value: f64,
}

/// A DCF result with its breakdown.
///
/// The breakdown is absent when the base value short-circuited to the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfValuation {
    /// The reported result.
    pub result: ValuationResult,
    /// Intermediate figures.
    pub breakdown: Option<DcfBreakdown>,
}

/// Intrinsic value per share.
///
/// # Example
///
/// ```
/// use intrinsic_dcf::dcf::{calc_intrinsic_value, DcfOptions};
/// use intrinsic_traits::ValuationParams;
///
/// let opts = DcfOptions::default().with_bvps(50.0);
/// let result = calc_intrinsic_value(0.0, 5.0, 10.0, &opts, &ValuationParams::default());
/// assert_eq!(result.intrinsic_value, 35.0);
/// assert!(result.is_asset_floored);
/// ```
#[must_use]
pub fn calc_intrinsic_value(
    base_value: f64,
    growth_rate: f64,
    discount_rate: f64,
    options: &DcfOptions,
    params: &ValuationParams,
) -> ValuationResult {
    calc_intrinsic_value_detailed(base_value, growth_rate, discount_rate, options, params).result
}

/// Intrinsic value per share together with the intermediate figures.
#[must_use]
pub fn calc_intrinsic_value_detailed(
    base_value: f64,
    growth_rate: f64,
    discount_rate: f64,
    options: &DcfOptions,
    params: &ValuationParams,
) -> DcfValuation {
    let discount_rate = finite_or_zero(discount_rate);

    let base_usable = base_value.is_finite() && base_value > 0.0;
    if !base_usable {
        return DcfValuation {
            result: floor_only(discount_rate, options.bvps, params.asset_floor_ratio),
            breakdown: None,
        };
    }

    let risk = estimate_risk_premium(&options.financials, &options.historical_eps, &params.risk);
    let effective_discount = discount_rate + risk.total;

    let years = options.years.unwrap_or(params.projection.years);
    let projection = project_cash_flows(
        base_value,
        finite_or_zero(growth_rate),
        effective_discount,
        years,
        finite_or_zero(options.share_dilution_rate),
        &params.projection,
    );

    let exit_multiple = params.exit_multiples.for_sector(options.sector.as_deref());
    let terminal = select_terminal_value(
        projection.final_year_value,
        effective_discount,
        years,
        exit_multiple,
        &params.projection,
    );

    let pre_floor_value = projection.present_value + terminal.discounted;
    let terminal_pct = if pre_floor_value > 0.0 {
        finite_or_zero(round_to(terminal.discounted / pre_floor_value * 100.0, 1))
    } else {
        0.0
    };

    let floored = apply_asset_floor(pre_floor_value, options.bvps, params.asset_floor_ratio);

    DcfValuation {
        result: ValuationResult {
            intrinsic_value: floored.value,
            terminal_pct,
            effective_discount: round_to(effective_discount, 2),
            risk_premium: risk.total,
            exit_multiple,
            is_asset_floored: floored.applied,
        },
        breakdown: Some(DcfBreakdown {
            risk,
            projection,
            terminal,
            pre_floor_value,
        }),
    }
}

/// Result for a base value that cannot be projected.
fn floor_only(discount_rate: f64, bvps: Option<f64>, ratio: f64) -> ValuationResult {
    let floor = asset_floor(bvps, ratio);
    debug!(?floor, "non-positive base value, using asset floor");
    ValuationResult {
        intrinsic_value: floor.unwrap_or(0.0),
        terminal_pct: 0.0,
        effective_discount: discount_rate,
        risk_premium: 0.0,
        exit_multiple: 0.0,
        is_asset_floored: floor.is_some(),
    }
}

/// Re-apply the asset floor to a finished result.
///
/// A result that already sits at or above the floor is returned unchanged,
/// so this is idempotent.
#[must_use]
pub fn reapply_asset_floor(result: ValuationResult, bvps: Option<f64>, ratio: f64) -> ValuationResult {
    let floored = apply_asset_floor(result.intrinsic_value, bvps, ratio);
    ValuationResult {
        intrinsic_value: floored.value,
        is_asset_floored: result.is_asset_floored || floored.applied,
        ..result
    }
}
