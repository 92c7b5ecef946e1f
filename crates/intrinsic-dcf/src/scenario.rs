//! Bear / base / bull scenario analysis.
//!
//! The bear case dampens growth and raises the discount rate; the bull case
//! uses undamped (but clamped) growth at a lower discount rate. Both start
//! from the mode-selected base value before any earnings-quality penalty.

use crate::base::select_base_value;
use crate::dcf::{DcfOptions, calc_intrinsic_value};
use intrinsic_traits::stats::{finite_or_zero, round_to};
use intrinsic_traits::{StockValuation, ValuationControls, ValuationParams};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bear case growth multiplier.
pub const BEAR_GROWTH_FACTOR: f64 = 0.6;
/// Bear case discount rate add-on (percentage points).
pub const BEAR_DISCOUNT_SPREAD: f64 = 2.0;
/// Bull case discount rate reduction (percentage points).
pub const BULL_DISCOUNT_SPREAD: f64 = 1.0;
/// Lowest discount rate a bull case may use.
pub const BULL_DISCOUNT_FLOOR: f64 = 3.0;

/// Scenario name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Pessimistic.
    Bear,
    /// The pipeline's own valuation.
    Base,
    /// Optimistic.
    Bull,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bear => "bear",
            Self::Base => "base",
            Self::Bull => "bull",
        })
    }
}

/// One scenario's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario name.
    pub kind: ScenarioKind,
    /// Intrinsic value per share.
    pub intrinsic_value: f64,
    /// Growth rate used (%).
    pub growth: f64,
    /// Discount rate shown for the scenario (%).
    pub discount_rate: f64,
}

/// The three scenarios of one stock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    /// Pessimistic case.
    pub bear: Scenario,
    /// Base case.
    pub base: Scenario,
    /// Optimistic case.
    pub bull: Scenario,
}

impl Scenarios {
    /// The scenarios in bear, base, bull order.
    #[must_use]
    pub const fn as_array(&self) -> [Scenario; 3] {
        [self.bear, self.base, self.bull]
    }
}

/// Run the bear and bull cases around an existing valuation.
#[must_use]
pub fn analyze_scenarios(
    valuation: &StockValuation,
    controls: &ValuationControls,
    params: &ValuationParams,
) -> Scenarios {
    let record = &valuation.record;
    let base_value = select_base_value(record, controls.mode).value;
    let options = DcfOptions::from(record);
    let discount_rate = finite_or_zero(controls.discount_rate);

    let bear_growth = round_to(valuation.normalized_growth() * BEAR_GROWTH_FACTOR, 1);
    let bear_discount = discount_rate + BEAR_DISCOUNT_SPREAD;
    let bear = calc_intrinsic_value(base_value, bear_growth, bear_discount, &options, params);

    let bull_growth = round_to(
        finite_or_zero(valuation.original_growth)
            .max(params.growth.min)
            .min(params.growth.max),
        1,
    );
    let bull_discount = (discount_rate - BULL_DISCOUNT_SPREAD).max(BULL_DISCOUNT_FLOOR);
    let bull = calc_intrinsic_value(base_value, bull_growth, bull_discount, &options, params);

    Scenarios {
        bear: Scenario {
            kind: ScenarioKind::Bear,
            intrinsic_value: bear.intrinsic_value,
            growth: bear_growth,
            discount_rate: bear_discount,
        },
        base: Scenario {
            kind: ScenarioKind::Base,
            intrinsic_value: valuation.intrinsic_value(),
            growth: valuation.normalized_growth(),
            discount_rate: valuation.result.effective_discount,
        },
        bull: Scenario {
            kind: ScenarioKind::Bull,
            intrinsic_value: bull.intrinsic_value,
            growth: bull_growth,
            discount_rate: bull_discount,
        },
    }
}
