//! Parallel batch valuation.

use intrinsic_traits::{StockRecord, StockValuation, ValuationControls, Valuator};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Value every record that was fetched successfully.
///
/// Records flagged `fetch_error` are skipped. Output order follows input order.
///
/// # Example
///
/// ```
/// use intrinsic_dcf::DcfValuator;
/// use intrinsic_portfolio::value_batch;
/// use intrinsic_traits::{StockRecord, ValuationControls};
///
/// let records = vec![
///     StockRecord { ticker: "2330".into(), eps: 30.0, price: 900.0, ..Default::default() },
///     StockRecord { ticker: "9999".into(), fetch_error: true, ..Default::default() },
/// ];
/// let out = value_batch(&DcfValuator::default(), &records, &ValuationControls::default());
/// assert_eq!(out.len(), 1);
/// ```
pub fn value_batch<V>(
    valuator: &V,
    records: &[StockRecord],
    controls: &ValuationControls,
) -> Vec<StockValuation>
where
    V: Valuator + ?Sized,
{
    let excluded: Vec<&str> = records
        .iter()
        .filter(|r| r.fetch_error)
        .map(|r| r.ticker.as_str())
        .collect();
    if !excluded.is_empty() {
        warn!(count = excluded.len(), tickers = ?excluded, "excluding records with fetch errors");
    }

    let valuations: Vec<StockValuation> = records
        .par_iter()
        .filter(|r| !r.fetch_error)
        .map(|r| valuator.value(r, controls))
        .collect();

    debug!(
        valuator = valuator.name(),
        valued = valuations.len(),
        mode = %controls.mode,
        "batch valued"
    );
    valuations
}
