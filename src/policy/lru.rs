//! # Least Recently Used (LRU) cache
//!
//! Every `put` and every `get` hit moves the key to the MRU end of a recency
//! list; on overflow the key at the LRU end is evicted before the new key goes
//! in.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, Slot { value, node: SlotId }>                  │   │
//!   │   └──────────────────────────────┬───────────────────────────────┘   │
//!   │                                  │                                   │
//!   │   ┌──────────────────────────────▼───────────────────────────────┐   │
//!   │   │  IntrusiveList<K> (recency order)                            │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [A] ◄──► [B] ◄──► [C] ◄── tail                     │   │
//!   │   │           MRU                LRU                             │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## LRU Operations Flow
//!
//! ```text
//!   put(D), cache full (capacity = 3)
//!   ═══════════════════════════════════════════════════════
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     1. pop [C] from the tail, emit DISCARD: C
//!     2. push [D] at the head
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   get(B)
//!   ═══════════════════════════════════════════════════════
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! | Operation      | Time | Notes                              |
//! |----------------|------|------------------------------------|
//! | `get`          | O(1) | hit moves key to the head          |
//! | `put`          | O(1) | may evict the tail                 |
//! | `peek`         | O(1) | no reordering                      |
//! | `peek_victim`  | O(1) | current tail                       |
//! | `keys`         | O(n) | tail (LRU) to head (MRU)           |
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = LruCache::new(2);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A");
//! cache.put("C", 3);
//!
//! assert!(!cache.contains(&"B"));
//! assert_eq!(cache.peek_victim(), Some(&"A"));
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

const POLICY: &str = "lru";

/// Recency-ordered cache that evicts the least recently used key.
pub struct LruCache<K, V> {
    /// Head is MRU, tail is LRU.
    store: LinkedStore<K, V>,
    capacity: usize,
    discard: Discard<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreOnlyMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    /// use evictkit::traits::ReadOnlyCache;
    ///
    /// let cache: LruCache<String, i32> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
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

    /// Installs a listener called for every evicted entry.
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

    /// The least recently used key.
    pub fn peek_victim(&self) -> Option<&K> {
        self.store.back()
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.store.keys_from_back()
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

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn evict_lru(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if let Some((key, value)) = self.store.pop_back() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            self.discard.notify(&key, &value);
        }
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.store.len())
            .field("discard", &self.discard)
            .finish_non_exhaustive()
    }
}

impl<K, V> ReadOnlyCache<K, V> for LruCache<K, V>
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

impl<K, V> CoreCache<K, V> for LruCache<K, V>
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

        if self.store.len() >= self.capacity {
            self.evict_lru();
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
impl<K, V> MetricsSnapshotProvider<CoreOnlyMetricsSnapshot> for LruCache<K, V>
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

    fn logged(capacity: usize) -> (LruCache<&'static str, i32>, DiscardLog<&'static str>) {
        let log = DiscardLog::new();
        let cache = LruCache::new(capacity).with_listener(log.clone());
        (cache, log)
    }

    mod basic_operations {
        use super::*;

        #[test]
        fn put_get_and_update() {
            let mut cache = LruCache::new(3);
            assert_eq!(cache.put(1, "one"), None);
            assert_eq!(cache.put(1, "uno"), Some("one"));
            assert_eq!(cache.get(&1), Some(&"uno"));
            assert_eq!(cache.get(&2), None);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn default_and_try_new() {
            let cache: LruCache<u8, u8> = LruCache::default();
            assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
            assert!(LruCache::<u8, u8>::try_new(0).is_err());
        }

        #[test]
        fn clear_resets_order() {
            let (mut cache, log) = logged(2);
            cache.put("a", 1);
            cache.put("b", 2);
            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.peek_victim(), None);
            assert!(log.is_empty());
        }
    }

    mod lru_behavior {
        use super::*;

        #[test]
        fn get_protects_key_from_eviction() {
            let (mut cache, log) = logged(2);
            cache.put("A", 1);
            cache.put("B", 2);
            cache.get(&"A");
            cache.put("C", 3);

            assert_eq!(log.keys(), vec!["B"]);
            assert!(cache.contains(&"A"));
            assert!(cache.contains(&"C"));
        }

        #[test]
        fn update_refreshes_recency() {
            let (mut cache, log) = logged(2);
            cache.put("A", 1);
            cache.put("B", 2);
            cache.put("A", 11);
            cache.put("C", 3);
            assert_eq!(log.keys(), vec!["B"]);
            assert_eq!(cache.peek(&"A"), Some(&11));
        }

        #[test]
        fn peek_does_not_refresh() {
            let (mut cache, log) = logged(2);
            cache.put("A", 1);
            cache.put("B", 2);
            assert_eq!(cache.peek(&"A"), Some(&1));
            assert!(cache.contains(&"A"));
            cache.put("C", 3);
            assert_eq!(log.keys(), vec!["A"]);
        }

        #[test]
        fn keys_run_lru_to_mru() {
            let mut cache = LruCache::new(3);
            cache.put('a', 0);
            cache.put('b', 0);
            cache.put('c', 0);
            cache.get(&'a');
            assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!['b', 'c', 'a']);
            assert_eq!(cache.peek_victim(), Some(&'b'));
        }

        #[test]
        fn eviction_sequence_follows_recency() {
            let (mut cache, log) = logged(3);
            for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
                cache.put(key, i as i32);
            }
            cache.get(&"a");
            cache.put("d", 3);
            cache.put("e", 4);
            assert_eq!(log.keys(), vec!["b", "c"]);
            cache.check_invariants().unwrap();
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn zero_capacity_rejects_inserts() {
            let (mut cache, log) = logged(0);
            cache.put("a", 1);
            assert!(cache.is_empty());
            assert!(log.is_empty());
        }

        #[test]
        fn miss_leaves_order_untouched() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            let before: Vec<_> = cache.keys().copied().collect();
            assert_eq!(cache.get(&9), None);
            let after: Vec<_> = cache.keys().copied().collect();
            assert_eq!(before, after);
        }
    }
}
