//! Margin of safety and signal classification.

use intrinsic_traits::{SignalThresholds, ValuationSignal};

/// Margin of safety in percent: `(iv - price) / iv × 100`.
///
/// Zero when the intrinsic value is not a positive finite number.
#[must_use]
pub fn margin_of_safety(price: f64, intrinsic_value: f64) -> f64 {
    if !intrinsic_value.is_finite() || intrinsic_value <= 0.0 || !price.is_finite() {
        return 0.0;
    }
    (intrinsic_value - price) / intrinsic_value * 100.0
}

/// Classify a margin of safety. Each tier includes its lower bound.
#[must_use]
pub fn classify(margin_of_safety: f64, thresholds: &SignalThresholds) -> ValuationSignal {
    if margin_of_safety >= thresholds.undervalued {
        ValuationSignal::Undervalued
    } else if margin_of_safety >= thresholds.fair {
        ValuationSignal::FairValue
    } else {
        ValuationSignal::Overvalued
    }
}
