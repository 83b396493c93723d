//! LIFO (Last In, First Out) cache replacement policy.
//!
//! When the cache is full, the key inserted most recently before the current
//! `put` is evicted. Reads never reorder; re-putting an existing key counts as
//! a fresh insertion and moves it to the top of the stack.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────────────┐
//!   │                       LifoCache<K, V> Layout                        │
//!   │                                                                     │
//!   │   store: LinkedStore<K, V>                                          │
//!   │                                                                     │
//!   │        front (top of stack)                  back (bottom)          │
//!   │          │                                      │                   │
//!   │          ▼                                      ▼                   │
//!   │        [ C ] ◄──► [ B ] ◄──► [ A ]                                  │
//!   │        newest                 oldest                                │
//!   │        EVICT                  keep                                  │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//!   put(D) with capacity 3:
//!     1. D not cached, cache full
//!     2. pop C from the top, emit DISCARD: C
//!     3. push D on top               → [ D ] ◄──► [ B ] ◄──► [ A ]
//!
//!   put(A, new value):
//!     1. A cached: replace value
//!     2. move A to the top           → [ A ] ◄──► [ D ] ◄──► [ B ]
//!
//!   get(B):
//!     lookup only, stack unchanged
//! ```
//!
//! ## Operations
//!
//! | Operation      | Time   | Notes                                 |
//! |----------------|--------|---------------------------------------|
//! | `get`          | O(1)   | map lookup, no reordering             |
//! | `put`          | O(1)   | may evict the top of the stack        |
//! | `peek_victim`  | O(1)   | top of the stack                      |
//! | `keys`         | O(n)   | top to bottom                         |
//! | `clear`        | O(n)   | no discard notifications              |
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::lifo::LifoCache;
//! use evictkit::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = LifoCache::new(2);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! assert_eq!(cache.get(&"A"), Some(&1));
//!
//! // Reads do not matter: B is still the newest insertion.
//! cache.put("C", 3);
//! assert!(!cache.contains(&"B"));
//! assert_eq!(cache.keys().collect::<Vec<_>>(), vec![&"C", &"A"]);
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

const POLICY: &str = "lifo";

/// Stack-ordered cache: evicts the newest insertion first.
pub struct LifoCache<K, V> {
    /// Front of the order list is the top of the stack.
    store: LinkedStore<K, V>,
    capacity: usize,
    discard: Discard<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreOnlyMetrics,
}

impl<K, V> LifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A zero capacity is accepted and yields a cache that drops every insert.
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

    /// Like [`new`](Self::new), but rejects a zero capacity.
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

    /// The key the next overflowing `put` would evict.
    pub fn peek_victim(&self) -> Option<&K> {
        self.store.front()
    }

    /// Keys from next-to-evict (newest) to last-to-evict (oldest).
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.store.keys_from_front()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.store.iter()
    }

    /// Renders the cache contents sorted by key.
    pub fn dump(&self) -> Dump<'_, K, V>
    where
        K: Ord,
    {
        dump::dump(self.store.iter())
    }

    /// Checks that the stack and the map hold the same keys and the capacity
    /// bound holds.
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

impl<K, V> LifoCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Pops the top of the stack and reports it.
    fn evict_one(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if let Some((key, value)) = self.store.pop_front() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            self.discard.notify(&key, &value);
        }
    }
}

impl<K, V> Default for LifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> fmt::Debug for LifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifoCache")
            .field("capacity", &self.capacity)
            .field("len", &self.store.len())
            .field("discard", &self.discard)
            .finish_non_exhaustive()
    }
}

impl<K, V> ReadOnlyCache<K, V> for LifoCache<K, V>
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

impl<K, V> CoreCache<K, V> for LifoCache<K, V>
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
            self.evict_one();
        }
        self.store.push_front(key, value);

        #[cfg(debug_assertions)]
        self.validate_invariants();
        None
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.store.peek(key) {
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
impl<K, V> MetricsSnapshotProvider<CoreOnlyMetricsSnapshot> for LifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CoreOnlyMetricsSnapshot {
        self.metrics.snapshot(self.store.len(), self.capacity)
    }
}
