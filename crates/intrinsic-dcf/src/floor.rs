//! Asset-based valuation floor.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A value after the asset floor has been considered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Floored {
    /// The resulting value.
    pub value: f64,
    /// Whether the book-value floor replaced the input.
    pub applied: bool,
}

/// The floor for a given book value per share, if one exists.
///
/// Returns `None` when book value is unknown, non-positive or non-finite.
#[must_use]
pub fn asset_floor(bvps: Option<f64>, ratio: f64) -> Option<f64> {
    bvps.filter(|b| b.is_finite() && *b > 0.0).map(|b| b * ratio)
}

/// Raise `value` to the asset floor when it falls below it.
///
/// NaN and negative values are treated as zero first and an overflowed value
/// saturates at `f64::MAX`, so the result is always finite and non-negative.
/// Applying the floor twice changes nothing.
///
/// # Example
///
/// ```
/// use intrinsic_dcf::floor::apply_asset_floor;
///
/// let floored = apply_asset_floor(10.0, Some(50.0), 0.7);
/// assert!(floored.applied);
/// assert_eq!(floored.value, 35.0);
/// assert_eq!(apply_asset_floor(floored.value, Some(50.0), 0.7).value, 35.0);
/// ```
#[must_use]
pub fn apply_asset_floor(value: f64, bvps: Option<f64>, ratio: f64) -> Floored {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, f64::MAX) };
    match asset_floor(bvps, ratio) {
        Some(floor) if value < floor => {
            debug!(value, floor, "asset floor applied");
            Floored {
                value: floor,
                applied: true,
            }
        }
        _ => Floored {
            value,
            applied: false,
        },
    }
}
