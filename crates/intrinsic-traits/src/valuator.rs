//! Valuator trait for turning stock records into valuations.
//!
//! This module defines the `Valuator` trait, the seam between the valuation
//! engine and its consumers (batch evaluation, caching, the CLI). A valuator
//! is a pure function of a record, the caller's controls and its own
//! parameters.

use crate::{StockRecord, StockValuation, ValuationControls, ValuationParams};

/// An engine that values individual stocks.
///
/// Implementations must be deterministic and thread-safe (`Send + Sync`)
/// so that batches can be valued in parallel and results memoized.
///
/// # Example
///
/// ```no_run
/// use intrinsic_traits::{
///     StockRecord, StockValuation, ValuationControls, ValuationParams, Valuator,
/// };
///
/// struct BookValue {
///     params: ValuationParams,
/// }
///
/// impl Valuator for BookValue {
///     fn name(&self) -> &str {
///         "book_value"
///     }
///
///     fn params(&self) -> &ValuationParams {
///         &self.params
///     }
///
///     fn value(&self, record: &StockRecord, controls: &ValuationControls) -> StockValuation {
///         todo!()
///     }
/// }
/// ```
pub trait Valuator: Send + Sync {
    /// Returns the name of this valuator, used in logs.
    fn name(&self) -> &str;

    /// The parameters this valuator was configured with.
    fn params(&self) -> &ValuationParams;

    /// Values one stock.
    ///
    /// This operation is total: malformed inputs are normalized, never
    /// reported as errors.
    fn value(&self, record: &StockRecord, controls: &ValuationControls) -> StockValuation;
}
