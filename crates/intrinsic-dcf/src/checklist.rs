//! Value-investing checklist.

use intrinsic_traits::{ChecklistThresholds, StockValuation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A checklist criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    /// Low price-to-earnings.
    LowPe,
    /// Low price-to-book.
    LowPb,
    /// High return on equity.
    HighRoe,
    /// High dividend yield.
    HighDividendYield,
    /// Low leverage.
    LowDebt,
    /// Healthy liquidity.
    Liquidity,
    /// Sufficient margin of safety.
    MarginOfSafety,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LowPe => "low P/E",
            Self::LowPb => "low P/B",
            Self::HighRoe => "high ROE",
            Self::HighDividendYield => "high dividend yield",
            Self::LowDebt => "low debt-to-equity",
            Self::Liquidity => "current ratio",
            Self::MarginOfSafety => "margin of safety",
        })
    }
}

/// Outcome of one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckItem {
    /// The criterion.
    pub criterion: Criterion,
    /// The stock's figure.
    pub value: f64,
    /// The threshold it was compared with.
    pub threshold: f64,
    /// Whether it passed.
    pub passed: bool,
}

/// The checklist of one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    /// Items in display order.
    pub items: Vec<CheckItem>,
}

impl Checklist {
    /// Number of passed criteria.
    #[must_use]
    pub fn score(&self) -> usize {
        self.items.iter().filter(|i| i.passed).count()
    }

    /// Number of criteria.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the checklist has no criteria.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Evaluate the checklist. The margin-of-safety criterion compares against
/// `mos_min`, normally the undervalued signal threshold.
#[must_use]
pub fn evaluate_checklist(
    valuation: &StockValuation,
    thresholds: &ChecklistThresholds,
    mos_min: f64,
) -> Checklist {
    let r = &valuation.record;
    let below = |criterion, value: f64, threshold: f64| CheckItem {
        criterion,
        value,
        threshold,
        passed: value < threshold,
    };
    let above = |criterion, value: f64, threshold: f64| CheckItem {
        criterion,
        value,
        threshold,
        passed: value > threshold,
    };

    Checklist {
        items: vec![
            below(Criterion::LowPe, r.pe, thresholds.pe_max),
            below(Criterion::LowPb, r.pb, thresholds.pb_max),
            above(Criterion::HighRoe, r.roe, thresholds.roe_min),
            above(
                Criterion::HighDividendYield,
                r.dividend_yield,
                thresholds.dividend_yield_min,
            ),
            below(
                Criterion::LowDebt,
                r.debt_to_equity,
                thresholds.debt_to_equity_max,
            ),
            above(
                Criterion::Liquidity,
                r.current_ratio,
                thresholds.current_ratio_min,
            ),
            above(Criterion::MarginOfSafety, valuation.margin_of_safety, mos_min),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intrinsic_traits::{StockRecord, ValuationResult, ValuationSignal};

    fn valuation(record: StockRecord, mos: f64) -> StockValuation {
        StockValuation {
            record,
            original_growth: 0.0,
            base_value: 0.0,
            fcf_penalty: None,
            result: ValuationResult {
                intrinsic_value: 0.0,
                terminal_pct: 0.0,
                effective_discount: 10.0,
                risk_premium: 0.0,
                exit_multiple: 12.0,
                is_asset_floored: false,
            },
            margin_of_safety: mos,
            signal: ValuationSignal::Overvalued,
        }
    }

    #[test]
    fn test_all_pass() {
        let record = StockRecord {
            pe: 9.0,
            pb: 1.1,
            roe: 18.0,
            dividend_yield: 6.0,
            debt_to_equity: 0.2,
            current_ratio: 2.5,
            ..StockRecord::default()
        };
        let c = evaluate_checklist(&valuation(record, 45.0), &ChecklistThresholds::default(), 30.0);
        assert_eq!(c.len(), 7);
        assert_eq!(c.score(), 7);
    }

    #[test]
    fn test_boundaries_fail() {
        let record = StockRecord {
            pe: 15.0,
            pb: 1.5,
            roe: 15.0,
            dividend_yield: 4.0,
            debt_to_equity: 0.5,
            current_ratio: 2.0,
            ..StockRecord::default()
        };
        let c = evaluate_checklist(&valuation(record, 30.0), &ChecklistThresholds::default(), 30.0);
        assert_eq!(c.score(), 0);
    }

    #[test]
    fn test_partial_score() {
        let record = StockRecord {
            pe: 22.0,
            pb: 3.0,
            roe: 25.0,
            dividend_yield: 5.2,
            debt_to_equity: 0.07,
            current_ratio: 1.54,
            ..StockRecord::default()
        };
        let c = evaluate_checklist(&valuation(record, -12.0), &ChecklistThresholds::default(), 30.0);
        assert_eq!(c.score(), 3);
        let passed: Vec<_> = c.items.iter().filter(|i| i.passed).map(|i| i.criterion).collect();
        assert_eq!(
            passed,
            [Criterion::HighRoe, Criterion::HighDividendYield, Criterion::LowDebt]
        );
    }
}
