//! Most Recently Used (MRU) cache.
//!
//! Same bookkeeping as LRU: every `put` and `get` hit moves the key to the
//! MRU end. The victim is the opposite end: when a new key arrives and the
//! cache is full, the key used most recently is evicted before the newcomer
//! is inserted. Suits cyclic scans where the item just touched is the one
//! least likely to be needed again soon.
//!
//! ```text
//!   capacity = 2
//!
//!   put(A), put(B)     head ──► [B] ◄──► [A] ◄── tail
//!   get(A)             head ──► [A] ◄──► [B] ◄── tail
//!   put(C)             evict head [A], emit DISCARD: A
//!                      head ──► [C] ◄──► [B] ◄── tail
//! ```
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::mru::MruCache;
//! use evictkit::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = MruCache::new(2);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A");
//! cache.put("C", 3);
//!
//! assert!(!cache.contains(&"A"));
//! assert!(cache.contains(&"B"));
//! ```

use std::fmt;
use std::hash::Hash;

use crate::dump::{self, Dump};
use crate::error::{ConfigError, InvariantError};
use crate::listener::{Discard, EvictionListener};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CoreOnlyMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CoreOnlyMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::policy::{nonzero_capacity, DEFAULT_CAPACITY};
use crate::store::LinkedStore;
use crate::traits::{CoreCache, ReadOnlyCache};

const POLICY: &str = "mru";

/// Recency-ordered cache that evicts the most recently used key.
pub struct MruCache<K, V> {
    /// Head is MRU and also the next victim.
    store: LinkedStore<K, V>,
    capacity: usize,
    discard: Discard<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreOnlyMetrics,
}

impl<K, V> MruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(policy = POLICY, capacity, "cache created");
        Self {
            store: LinkedStore::with_capacity(capacity),
            capacity,
            discard: Discard::new(POLICY),
            #[cfg(feature = "metrics")]
            metrics: CoreOnlyMetrics::default(),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        nonzero_capacity(capacity).map(Self::new)
    }

    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: EvictionListener<K, V> + 'static,
    {
        self.discard.set_listener(Box::new(listener));
        self
    }

    pub(crate) fn set_listener(&mut self, listener: Box<dyn EvictionListener<K, V>>) {
        self.discard.set_listener(listener);
    }

    /// The most recently used key.
    pub fn peek_victim(&self) -> Option<&K> {
        self.store.front()
    }

    /// Keys from most to least recently used, which is also eviction order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.store.keys_from_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.store.iter()
    }

    pub fn dump(&self) -> Dump<'_, K, V>
    where
        K: Ord,
    {
        dump::dump(self.store.iter())
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.store.validate()?;
        if self.store.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.store.len(),
                self.capacity
            )));
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        let checked = self.check_invariants();
        debug_assert!(checked.is_ok(), "{:?}", checked);
    }
}

impl<K, V> MruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn evict_mru(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if let Some((key, value)) = self.store.pop_front() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            self.discard.notify(&key, &value);
        }
    }
}

impl<K, V> Default for MruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> fmt::Debug for MruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.store.len())
            .field("discard", &self.discard)
            .finish_non_exhaustive()
    }
}

impl<K, V> ReadOnlyCache<K, V> for MruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        self.store.peek(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for MruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return None;
        }

        if self.store.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            let previous = self.store.replace(&key, value);
            self.store.promote(&key);
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        // Victim is taken from the head before the newcomer lands there.
        if self.store.len() >= self.capacity {
            self.evict_mru();
        }
        self.store.push_front(key, value);

        #[cfg(debug_assertions)]
        self.validate_invariants();
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match self.store.promote(key) {
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
        self.store.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreOnlyMetricsSnapshot> for MruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CoreOnlyMetricsSnapshot {
        self.metrics.snapshot(self.store.len(), self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::DiscardLog;

    fn logged(capacity: usize) -> (MruCache<&'static str, i32>, DiscardLog<&'static str>) {
        let log = DiscardLog::new();
        let cache = MruCache::new(capacity).with_listener(log.clone());
        (cache, log)
    }

    mod mru_behavior {
        use super::*;

        #[test]
        fn evicts_most_recently_read() {
            let (mut cache, log) = logged(2);
            cache.put("A", 1);
            cache.put("B", 2);
            cache.get(&"A");
            cache.put("C", 3);

            assert_eq!(log.keys(), vec!["A"]);
            assert!(cache.contains(&"B"));
            assert!(cache.contains(&"C"));
        }

        #[test]
        fn without_reads_evicts_latest_put() {
            let (mut cache, log) = logged(2);
            cache.put("A", 1);
            cache.put("B", 2);
            cache.put("C", 3);
            cache.put("D", 4);
            assert_eq!(log.keys(), vec!["B", "C"]);
            assert_eq!(cache.peek_victim(), Some(&"D"));
        }

        #[test]
        fn update_makes_key_the_victim() {
            let (mut cache, log) = logged(3);
            cache.put("A", 1);
            cache.put("B", 2);
            cache.put("C", 3);
            assert_eq!(cache.put("A", 10), Some(1));
            cache.put("D", 4);
            assert_eq!(log.keys(), vec!["A"]);
        }

        #[test]
        fn keys_run_mru_to_lru() {
            let mut cache = MruCache::new(3);
            cache.put(1, ());
            cache.put(2, ());
            cache.put(3, ());
            cache.get(&1);
            assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn single_capacity_keeps_newest() {
            let (mut cache, log) = logged(1);
            cache.put("a", 1);
            cache.put("b", 2);
            assert_eq!(cache.get(&"b"), Some(&2));
            assert_eq!(log.keys(), vec!["a"]);
        }

        #[test]
        fn miss_and_peek_do_not_reorder() {
            let mut cache = MruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            assert_eq!(cache.get(&3), None);
            assert_eq!(cache.peek(&1), Some(&1));
            assert_eq!(cache.peek_victim(), Some(&2));
        }

        #[test]
        fn default_capacity_and_clear() {
            let mut cache: MruCache<u32, u32> = MruCache::default();
            for i in 0..10 {
                cache.put(i, i);
            }
            assert_eq!(cache.len(), DEFAULT_CAPACITY);
            cache.clear();
            assert!(cache.is_empty());
            cache.check_invariants().unwrap();
        }
    }
}
