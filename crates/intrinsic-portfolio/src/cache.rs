//! Memoization of batch valuations.
//!
//! Valuation is deterministic, so a batch only needs recomputing when the
//! snapshot or the controls change. Entries are never invalidated otherwise.

use crate::batch::value_batch;
use intrinsic_traits::{StockSnapshot, StockValuation, ValuationControls, ValuationMode, Valuator};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Identifies one batch: the snapshot contents and the exact controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Snapshot fingerprint.
    pub snapshot: u64,
    /// Bit pattern of the discount rate.
    pub discount_rate: u64,
    /// Bit pattern of the growth discount.
    pub growth_discount: u64,
    /// Valuation mode.
    pub mode: ValuationMode,
}

impl CacheKey {
    /// Build the key for a snapshot and controls.
    #[must_use]
    pub fn new(snapshot: &StockSnapshot, controls: &ValuationControls) -> Self {
        Self {
            snapshot: snapshot.fingerprint(),
            discount_rate: controls.discount_rate.to_bits(),
            growth_discount: controls.growth_discount.to_bits(),
            mode: controls.mode,
        }
    }
}

/// Shared, thread-safe cache of batch valuations.
///
/// Keys do not include the valuator's parameters; use one cache per valuator.
/// Every distinct control value adds an entry and nothing is evicted, so
/// callers that sweep controls continuously (a slider, an optimizer) should
/// [`clear`](Self::clear) the cache when the snapshot changes or periodically.
#[derive(Debug, Default)]
pub struct ValuationCache {
    entries: RwLock<HashMap<CacheKey, Arc<[StockValuation]>>>,
}

impl ValuationCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached batch for this snapshot and controls, valuing it on a miss.
    pub fn get_or_value<V>(
        &self,
        valuator: &V,
        snapshot: &StockSnapshot,
        controls: &ValuationControls,
    ) -> Arc<[StockValuation]>
    where
        V: Valuator + ?Sized,
    {
        let key = CacheKey::new(snapshot, controls);
        if let Some(hit) = self.get(&key) {
            debug!(?key, "valuation cache hit");
            return hit;
        }

        debug!(?key, "valuation cache miss");
        let batch: Arc<[StockValuation]> = value_batch(valuator, &snapshot.stocks, controls).into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key).or_insert(batch))
    }

    /// Look up a batch without computing it.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<[StockValuation]>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Number of cached batches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use intrinsic_dcf::DcfValuator;
    use intrinsic_traits::StockRecord;

    fn snapshot(eps: f64) -> StockSnapshot {
        StockSnapshot {
            last_update: NaiveDate::from_ymd_opt(2025, 3, 14)
                .and_then(|d| d.and_hms_opt(9, 30, 0))
                .unwrap(),
            stocks: vec![StockRecord {
                ticker: "2330".into(),
                price: 100.0,
                eps,
                growth_rate: 8.0,
                ..StockRecord::default()
            }],
        }
    }

    #[test]
    fn test_hit_returns_shared_result() {
        let cache = ValuationCache::new();
        let valuator = DcfValuator::default();
        let snap = snapshot(5.0);
        let controls = ValuationControls::default();

        let first = cache.get_or_value(&valuator, &snap, &controls);
        let second = cache.get_or_value(&valuator, &snap, &controls);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_changes_miss() {
        let cache = ValuationCache::new();
        let valuator = DcfValuator::default();
        let controls = ValuationControls::default();

        let a = cache.get_or_value(&valuator, &snapshot(5.0), &controls);
        let b = cache.get_or_value(&valuator, &snapshot(6.0), &controls);
        assert!(!Arc::ptr_eq(&a, &b));

        let mut other = controls;
        other.discount_rate = 12.0;
        cache.get_or_value(&valuator, &snapshot(5.0), &other);
        other.mode = ValuationMode::Eps;
        cache.get_or_value(&valuator, &snapshot(5.0), &other);
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_clear() {
        let cache = ValuationCache::new();
        cache.get_or_value(&DcfValuator::default(), &snapshot(5.0), &ValuationControls::default());
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
        let key = CacheKey::new(&snapshot(5.0), &ValuationControls::default());
        assert!(cache.get(&key).is_none());
    }
}
