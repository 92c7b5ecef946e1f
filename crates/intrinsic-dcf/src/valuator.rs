//! The per-stock DCF pipeline.

use crate::base::{BaseValue, select_base_value};
use crate::dcf::{DcfOptions, DcfValuation, calc_intrinsic_value_detailed};
use crate::growth::{GrowthInputs, NormalizedGrowth, normalize_growth};
use crate::quality::{QualityAdjustment, adjust_for_earnings_quality};
use crate::signal::{classify, margin_of_safety};
use intrinsic_traits::stats::finite_or_zero;
use intrinsic_traits::{
    StockRecord, StockValuation, ValuationControls, ValuationParams, Valuator,
};

/// Values stocks with the two-stage DCF.
///
/// # Example
///
/// ```
/// use intrinsic_dcf::DcfValuator;
/// use intrinsic_traits::{StockRecord, ValuationControls, Valuator};
///
/// let record = StockRecord { price: 100.0, eps: 5.0, growth_rate: 6.0, ..Default::default() };
/// let valuation = DcfValuator::default().value(&record, &ValuationControls::default());
/// assert!(valuation.intrinsic_value() > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DcfValuator {
    params: ValuationParams,
}

/// Every intermediate stage of valuing one stock.
#[derive(Debug, Clone)]
pub struct PipelineTrace {
    /// Growth normalization.
    pub growth: NormalizedGrowth,
    /// Mode-selected base value before the quality penalty.
    pub base: BaseValue,
    /// Quality-adjusted base value.
    pub quality: QualityAdjustment,
    /// DCF inputs derived from the record.
    pub options: DcfOptions,
    /// DCF result and breakdown.
    pub dcf: DcfValuation,
    /// Final valuation.
    pub valuation: StockValuation,
}

impl DcfValuator {
    /// Create a valuator with the given parameters.
    #[must_use]
    pub const fn new(params: ValuationParams) -> Self {
        Self { params }
    }

    /// Value a stock and keep every intermediate stage.
    #[must_use]
    pub fn trace(&self, record: &StockRecord, controls: &ValuationControls) -> PipelineTrace {
        let params = &self.params;
        let eps = finite_or_zero(record.eps);
        let price = finite_or_zero(record.price);

        let growth = normalize_growth(
            &GrowthInputs {
                raw_growth: record.growth_rate,
                growth_discount: controls.growth_discount,
                roe: record.roe,
                eps,
                price,
                dividend_yield: record.dividend_yield,
            },
            &params.growth,
        );

        let base = select_base_value(record, controls.mode);
        let quality = adjust_for_earnings_quality(
            base.value,
            controls.mode,
            eps,
            record.fcf_per_share,
            &record.sector,
            &params.quality,
        );

        let options = DcfOptions::from(record);
        let dcf = calc_intrinsic_value_detailed(
            quality.base_value,
            growth.rate,
            controls.discount_rate,
            &options,
            params,
        );

        let margin = margin_of_safety(price, dcf.result.intrinsic_value);
        let valuation = StockValuation {
            record: StockRecord {
                growth_rate: growth.rate,
                ..record.clone()
            },
            original_growth: record.growth_rate,
            base_value: quality.base_value,
            fcf_penalty: quality.penalty,
            result: dcf.result,
            margin_of_safety: margin,
            signal: classify(margin, &params.signal),
        };

        PipelineTrace {
            growth,
            base,
            quality,
            options,
            dcf,
            valuation,
        }
    }
}

impl Valuator for DcfValuator {
    fn name(&self) -> &str {
        "dcf"
    }

    fn params(&self) -> &ValuationParams {
        &self.params
    }

    fn value(&self, record: &StockRecord, controls: &ValuationControls) -> StockValuation {
        self.trace(record, controls).valuation
    }
}
