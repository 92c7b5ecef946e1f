//! Loading snapshots and parameters for the Intrinsic CLI.

use intrinsic_traits::{IntrinsicError, StockSnapshot, ValuationControls, ValuationParams};
use std::path::Path;
use tracing::debug;

/// Load model parameters, falling back to the defaults when no file is given.
pub(crate) fn load_params(path: Option<&Path>) -> Result<ValuationParams, IntrinsicError> {
    match path {
        Some(p) => {
            debug!(path = %p.display(), "loading parameters");
            ValuationParams::from_toml_file(p)
        }
        None => Ok(ValuationParams::default()),
    }
}

/// Load a snapshot and check the controls it will be valued with.
pub(crate) fn load_snapshot(
    path: &Path,
    controls: &ValuationControls,
) -> Result<StockSnapshot, IntrinsicError> {
    controls.validate()?;
    let snapshot = StockSnapshot::from_path(path)?;
    debug!(
        path = %path.display(),
        stocks = snapshot.stocks.len(),
        last_update = %snapshot.last_update,
        "snapshot loaded"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = load_params(None).unwrap();
        assert_eq!(params, ValuationParams::default());
    }

    #[test]
    fn test_missing_files() {
        assert!(load_params(Some(Path::new("/nonexistent/params.toml"))).is_err());
        let err = load_snapshot(Path::new("/nonexistent/stocks.json"), &ValuationControls::default())
            .unwrap_err();
        assert!(matches!(err, IntrinsicError::Snapshot(_)));
    }

    #[test]
    fn test_demo_snapshot() {
        use intrinsic_dcf::DcfValuator;
        use intrinsic_portfolio::value_batch;

        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/snapshot.json");
        let controls = ValuationControls::default();
        let snapshot = load_snapshot(&path, &controls).unwrap();
        assert_eq!(snapshot.stocks.len(), 5);
        assert_eq!(snapshot.valid_records().count(), 4);

        let valuations = value_batch(&DcfValuator::default(), &snapshot.stocks, &controls);
        assert_eq!(valuations.len(), 4);
        assert!(valuations.iter().all(|v| v.intrinsic_value() > 0.0));

        // financial-sector records skip the cash-conversion penalty
        let bank = valuations.iter().find(|v| v.ticker().as_str() == "2882").unwrap();
        assert!(bank.fcf_penalty.is_none());
        let builder = valuations.iter().find(|v| v.ticker().as_str() == "5515").unwrap();
        assert!(builder.result.is_asset_floored);
    }

    #[test]
    fn test_rejects_non_finite_controls() {
        let mut controls = ValuationControls::default();
        controls.discount_rate = f64::NAN;
        let err = load_snapshot(Path::new("stocks.json"), &controls).unwrap_err();
        assert!(matches!(err, IntrinsicError::InvalidControl(_)));
    }
}
