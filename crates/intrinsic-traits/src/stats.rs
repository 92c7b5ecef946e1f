//! Numeric helpers shared by the valuation stages.
//!
//! Inputs from the data pipeline may be missing or non-finite; these helpers
//! normalize them and provide the handful of statistics the engine needs.

/// Replace a non-finite value with zero.
///
/// # Examples
///
/// ```
/// use intrinsic_traits::stats::finite_or_zero;
///
/// assert_eq!(finite_or_zero(f64::NAN), 0.0);
/// assert_eq!(finite_or_zero(3.5), 3.5);
/// ```
#[must_use]
pub const fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Round to a fixed number of decimal places.
///
/// Halves round away from zero.
///
/// # Examples
///
/// ```
/// use intrinsic_traits::stats::round_to;
///
/// assert_eq!(round_to(6.64, 1), 6.6);
/// assert_eq!(round_to(1.235, 2), 1.24);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Mean and population standard deviation of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispersion {
    /// Number of finite values the figures were computed from.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (N denominator).
    pub std: f64,
}

impl Dispersion {
    /// Compute mean and population standard deviation.
    ///
    /// Returns `None` for an empty series. Non-finite entries are skipped.
    #[must_use]
    pub fn of(values: &[f64]) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }

        let n = finite.len() as f64;
        let mean = finite.iter().sum::<f64>() / n;
        let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            count: finite.len(),
            mean,
            std: variance.sqrt(),
        })
    }

    /// Coefficient of variation, `std / |mean|`.
    ///
    /// Returns `None` when `|mean|` does not exceed `min_abs_mean`, since the
    /// ratio is meaningless for series centred on zero.
    #[must_use]
    pub fn coefficient_of_variation(&self, min_abs_mean: f64) -> Option<f64> {
        let abs_mean = self.mean.abs();
        (abs_mean > min_abs_mean).then(|| self.std / abs_mean)
    }
}
