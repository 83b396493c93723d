//! # LFU (Least Frequently Used) cache with LRU tie-breaking
//!
//! Each key carries a use counter. A new key starts at 0; every `get` hit and
//! every `put` that updates an existing key adds one. On overflow the victim
//! is the key with the lowest counter, and among keys sharing that counter the
//! one touched longest ago.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                              │
//!   │                                                                      │
//!   │   values: FxHashMap<K, V>                                            │
//!   │                                                                      │
//!   │   freq: FrequencyBuckets<K>                                          │
//!   │                                                                      │
//!   │     min_freq ─► freq=0: head ─► [D] ◄──► [C] ◄─ tail   (C is victim) │
//!   │                   │                                                  │
//!   │                 freq=2: head ─► [B] ◄─ tail                          │
//!   │                   │                                                  │
//!   │                 freq=5: head ─► [A] ◄─ tail                          │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Walkthrough
//!
//! ```text
//!   capacity = 2
//!
//!   put(A)          {A:0}
//!   put(B)          {B:0, A:0}          B touched more recently than A
//!   get(A), get(A)  {B:0, A:2}
//!   put(C)          evict B (lowest frequency), emit DISCARD: B
//!                   {C:0, A:2}
//!
//!   put(A), put(B), put(C) on a fresh cache:
//!                   A and B both at 0; A touched longest ago → evict A
//! ```
//!
//! | Operation      | Time | Notes                                        |
//! |----------------|------|----------------------------------------------|
//! | `get`          | O(1) | hit bumps frequency                          |
//! | `put`          | O(1) | update bumps frequency; new key may evict    |
//! | `frequency`    | O(1) | current counter                              |
//! | `peek_victim`  | O(1) | tail of the lowest bucket                    |
//! | `keys`         | O(n) | victim first, buckets ascending              |
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A");
//! cache.get(&"A");
//! cache.put("C", 3);
//!
//! assert!(!cache.contains(&"B"));
//! assert_eq!(cache.frequency(&"A"), Some(2));
//! assert_eq!(cache.frequency(&"C"), Some(0));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::frequency_buckets::FrequencyBuckets;
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
use crate::traits::{CoreCache, ReadOnlyCache};

const POLICY: &str = "lfu";

/// Frequency-ordered cache; least recently touched loses among equals.
pub struct LfuCache<K, V> {
    values: FxHashMap<K, V>,
    freq: FrequencyBuckets<K>,
    capacity: usize,
    discard: Discard<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreOnlyMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// ```
    /// use evictkit::policy::lfu::LfuCache;
    /// use evictkit::traits::ReadOnlyCache;
    ///
    /// let cache: LfuCache<u64, Vec<u8>> = LfuCache::new(64);
    /// assert_eq!(cache.capacity(), 64);
    /// ```
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(policy = POLICY, capacity, "cache created");
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            freq: FrequencyBuckets::with_capacity(capacity),
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

    /// Use count of `key`: 0 right after insertion, +1 per hit or update.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.freq.frequency(key)
    }

    /// The key the next overflowing `put` would evict.
    pub fn peek_victim(&self) -> Option<&K> {
        self.freq.peek_min().map(|(key, _)| key)
    }

    /// Keys in eviction order: ascending frequency, least recent first within
    /// a frequency.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.freq.iter_eviction_order().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.values.iter()
    }

    pub fn dump(&self) -> Dump<'_, K, V>
    where
        K: Ord,
    {
        dump::dump(self.values.iter())
    }

    /// Checks that every cached key has exactly one frequency entry, the
    /// bucket chain is well formed, and the capacity bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.freq.validate()?;
        if self.values.len() != self.freq.len() {
            return Err(InvariantError::new(format!(
                "{} values but {} frequency entries",
                self.values.len(),
                self.freq.len()
            )));
        }
        // Counts match, so one missing key means the sets differ.
        if self.values.keys().any(|key| !self.freq.contains(key)) {
            return Err(InvariantError::new("cached key has no frequency entry"));
        }
        if self.values.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.values.len(),
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

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn evict_lfu(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if let Some((key, _freq)) = self.freq.pop_min() {
            if let Some(value) = self.values.remove(&key) {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
                self.discard.notify(&key, &value);
            }
        }
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.capacity)
            .field("len", &self.values.len())
            .field("min_freq", &self.freq.min_freq())
            .field("discard", &self.discard)
            .finish_non_exhaustive()
    }
}

impl<K, V> ReadOnlyCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return None;
        }

        if let Some(slot) = self.values.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            let previous = std::mem::replace(slot, value);
            self.freq.touch(&key);
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.values.len() >= self.capacity {
            self.evict_lfu();
        }
        self.freq.insert(key.clone());
        self.values.insert(key, value);

        #[cfg(debug_assertions)]
        self.validate_invariants();
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match self.values.get(key) {
            Some(value) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                self.freq.touch(key);
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
        self.values.clear();
        self.freq.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreOnlyMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CoreOnlyMetricsSnapshot {
        self.metrics.snapshot(self.values.len(), self.capacity)
    }
}
