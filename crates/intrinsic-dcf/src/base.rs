//! Base-value selection by valuation mode.

use intrinsic_traits::stats::finite_or_zero;
use intrinsic_traits::{StockRecord, ValuationMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which per-share figure ended up as the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BaseSource {
    /// Current EPS.
    Eps,
    /// Smoothed EPS.
    SmoothedEps,
    /// Free cash flow per share.
    FcfPerShare,
}

impl BaseSource {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Eps => "EPS",
            Self::SmoothedEps => "smoothed EPS",
            Self::FcfPerShare => "FCF per share",
        }
    }
}

impl fmt::Display for BaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The selected base value and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseValue {
    /// Per-share base value, before any earnings-quality penalty.
    pub value: f64,
    /// Source figure.
    pub source: BaseSource,
}

/// Pick the base value for a mode, falling back to current EPS when the
/// preferred figure is missing.
#[must_use]
pub fn select_base_value(record: &StockRecord, mode: ValuationMode) -> BaseValue {
    match (mode, record.avg_eps, record.fcf_per_share) {
        (ValuationMode::AvgEps, Some(avg), _) => BaseValue {
            value: avg,
            source: BaseSource::SmoothedEps,
        },
        (ValuationMode::FcfPerShare, _, Some(fcfps)) => BaseValue {
            value: fcfps,
            source: BaseSource::FcfPerShare,
        },
        _ => BaseValue {
            value: finite_or_zero(record.eps),
            source: BaseSource::Eps,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StockRecord {
        StockRecord {
            eps: 7.5,
            avg_eps: Some(7.1),
            fcf_per_share: Some(6.2),
            ..StockRecord::default()
        }
    }

    #[test]
    fn test_mode_selects_figure() {
        let r = record();
        let b = select_base_value(&r, ValuationMode::Eps);
        assert_eq!(b.value, 7.5);
        assert_eq!(b.source, BaseSource::Eps);

        let b = select_base_value(&r, ValuationMode::AvgEps);
        assert_eq!(b.value, 7.1);
        assert_eq!(b.source, BaseSource::SmoothedEps);

        let b = select_base_value(&r, ValuationMode::FcfPerShare);
        assert_eq!(b.value, 6.2);
        assert_eq!(b.source, BaseSource::FcfPerShare);
    }

    #[test]
    fn test_fallback_to_eps() {
        let r = StockRecord {
            eps: 3.0,
            ..StockRecord::default()
        };
        assert_eq!(select_base_value(&r, ValuationMode::AvgEps).source, BaseSource::Eps);
        assert_eq!(select_base_value(&r, ValuationMode::FcfPerShare).value, 3.0);
    }

    #[test]
    fn test_nan_eps_is_zero() {
        let r = StockRecord {
            eps: f64::NAN,
            ..StockRecord::default()
        };
        assert_eq!(select_base_value(&r, ValuationMode::Eps).value, 0.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(BaseSource::SmoothedEps.to_string(), "smoothed EPS");
        assert_eq!(BaseSource::FcfPerShare.label(), "FCF per share");
    }
}
