//! Cache without a capacity limit.
//!
//! A plain map behind the cache traits: `put` always inserts or updates,
//! nothing is ever evicted, and no order is tracked. Handy as a baseline when
//! comparing policies, or when the key space is known to be small.
//!
//! ```
//! use evictkit::policy::unbounded::UnboundedCache;
//! use evictkit::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = UnboundedCache::new();
//! for i in 0..1_000 {
//!     cache.put(i, i * 2);
//! }
//! assert_eq!(cache.len(), 1_000);
//! assert_eq!(cache.capacity(), usize::MAX);
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::dump::{self, Dump};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CoreOnlyMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CoreOnlyMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{CoreCache, ReadOnlyCache};

/// Map-backed cache that never evicts.
pub struct UnboundedCache<K, V> {
    map: FxHashMap<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreOnlyMetrics,
}

impl<K, V> UnboundedCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-sizes the map for `capacity` entries; the cache still grows past it.
    pub fn with_capacity(capacity: usize) -> Self {
        tracing::debug!(policy = "unbounded", capacity, "cache created");
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            #[cfg(feature = "metrics")]
            metrics: CoreOnlyMetrics::default(),
        }
    }

    /// Always `None`: nothing is ever evicted.
    pub fn peek_victim(&self) -> Option<&K> {
        None
    }

    /// Keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.map.iter()
    }

    pub fn dump(&self) -> Dump<'_, K, V>
    where
        K: Ord,
    {
        dump::dump(self.map.iter())
    }

    /// No metadata to disagree with the map.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        Ok(())
    }
}

impl<K, V> Default for UnboundedCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for UnboundedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnboundedCache")
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> ReadOnlyCache<K, V> for UnboundedCache<K, V>
where
    K: Eq + Hash,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        usize::MAX
    }
}

impl<K, V> CoreCache<K, V> for UnboundedCache<K, V>
where
    K: Eq + Hash,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.map.insert(key, value);
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_insert_call();
            if previous.is_some() {
                self.metrics.record_insert_update();
            } else {
                self.metrics.record_insert_new();
            }
        }
        previous
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(value) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                Some(value)
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                None
            },
        }
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.map.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreOnlyMetricsSnapshot> for UnboundedCache<K, V>
where
    K: Eq + Hash,
{
    fn snapshot(&self) -> CoreOnlyMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_without_eviction() {
        let mut cache = UnboundedCache::with_capacity(2);
        for i in 0..100u32 {
            assert_eq!(cache.put(i, i), None);
        }
        assert_eq!(cache.len(), 100);
        assert_eq!(cache.get(&0), Some(&0));
        assert_eq!(cache.peek_victim(), None);
    }

    #[test]
    fn update_returns_previous() {
        let mut cache = UnboundedCache::new();
        cache.put("k", 1);
        assert_eq!(cache.put("k", 2), Some(1));
        assert_eq!(cache.peek(&"k"), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn none_inputs_are_ignored() {
        let mut cache: UnboundedCache<&str, i32> = UnboundedCache::default();
        cache.put_opt(None, Some(1));
        cache.put_opt(Some("a"), None);
        assert!(cache.is_empty());
        assert_eq!(cache.get_opt(None), None);
    }

    #[test]
    fn clear_and_dump() {
        let mut cache = UnboundedCache::new();
        cache.put(2, "two");
        cache.put(1, "one");
        assert_eq!(cache.dump().to_string(), "Current cache:\n1: one\n2: two\n");
        cache.clear();
        assert_eq!(cache.dump().to_string(), "Current cache:\n");
        cache.check_invariants().unwrap();
    }
}
