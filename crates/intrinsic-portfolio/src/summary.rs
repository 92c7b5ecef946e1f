//! Portfolio-level summary statistics.

use intrinsic_traits::stats::finite_or_zero;
use intrinsic_traits::{StockValuation, ValuationSignal};
use serde::{Deserialize, Serialize};

/// Counts and averages over a batch of valuations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Number of valued stocks.
    pub total: usize,
    /// Stocks classified undervalued.
    pub undervalued: usize,
    /// Stocks classified fair value.
    pub fair_value: usize,
    /// Stocks classified overvalued.
    pub overvalued: usize,
    /// Mean dividend yield (%), 0 for an empty batch.
    pub average_dividend_yield: f64,
    /// Mean ROE (%), 0 for an empty batch.
    pub average_roe: f64,
    /// Distinct sectors in first-seen order.
    pub sectors: Vec<String>,
}

impl PortfolioSummary {
    /// Summarize a batch.
    ///
    /// Non-finite ratios count as zero in the averages.
    #[must_use]
    pub fn from_valuations(valuations: &[StockValuation]) -> Self {
        let mut summary = Self {
            total: valuations.len(),
            ..Self::default()
        };

        let mut dividend_sum = 0.0;
        let mut roe_sum = 0.0;
        for v in valuations {
            match v.signal {
                ValuationSignal::Undervalued => summary.undervalued += 1,
                ValuationSignal::FairValue => summary.fair_value += 1,
                ValuationSignal::Overvalued => summary.overvalued += 1,
            }
            dividend_sum += finite_or_zero(v.record.dividend_yield);
            roe_sum += finite_or_zero(v.record.roe);
        }

        if !valuations.is_empty() {
            let n = valuations.len() as f64;
            summary.average_dividend_yield = dividend_sum / n;
            summary.average_roe = roe_sum / n;
        }
        summary.sectors = distinct_sectors(valuations.iter().map(|v| v.record.sector.as_str()));
        summary
    }

    /// Number of stocks with a given signal.
    #[must_use]
    pub const fn count(&self, signal: ValuationSignal) -> usize {
        match signal {
            ValuationSignal::Undervalued => self.undervalued,
            ValuationSignal::FairValue => self.fair_value,
            ValuationSignal::Overvalued => self.overvalued,
        }
    }
}

/// Distinct, non-empty sector names in first-seen order.
#[must_use]
pub fn distinct_sectors<'a>(sectors: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for sector in sectors {
        if !sector.is_empty() && !out.iter().any(|s| s == sector) {
            out.push(sector.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use intrinsic_traits::{StockRecord, ValuationResult};

    fn valuation(sector: &str, dy: f64, roe: f64, signal: ValuationSignal) -> StockValuation {
        StockValuation {
            record: StockRecord {
                sector: sector.to_string(),
                dividend_yield: dy,
                roe,
                ..StockRecord::default()
            },
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
            margin_of_safety: 0.0,
            signal,
        }
    }

    #[test]
    fn test_counts_and_averages() {
        let batch = vec![
            valuation("電子", 4.0, 20.0, ValuationSignal::Undervalued),
            valuation("營建", 6.0, 10.0, ValuationSignal::FairValue),
            valuation("電子", 2.0, 15.0, ValuationSignal::Overvalued),
            valuation("金融", 0.0, f64::NAN, ValuationSignal::Overvalued),
        ];
        let s = PortfolioSummary::from_valuations(&batch);
        assert_eq!(s.total, 4);
        assert_eq!(s.undervalued, 1);
        assert_eq!(s.fair_value, 1);
        assert_eq!(s.count(ValuationSignal::Overvalued), 2);
        assert_relative_eq!(s.average_dividend_yield, 3.0);
        assert_relative_eq!(s.average_roe, 11.25);
        assert_eq!(s.sectors, ["電子", "營建", "金融"]);
    }

    #[test]
    fn test_empty_batch() {
        let s = PortfolioSummary::from_valuations(&[]);
        assert_eq!(s.total, 0);
        assert_relative_eq!(s.average_dividend_yield, 0.0);
        assert_relative_eq!(s.average_roe, 0.0);
        assert!(s.sectors.is_empty());
    }

    #[test]
    fn test_distinct_sectors_skips_blank() {
        assert_eq!(distinct_sectors(["光電", "", "光電", "軟體"]), ["光電", "軟體"]);
    }
}
