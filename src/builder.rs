//! Unified construction and dispatch over all policies.
//!
//! [`CachePolicy`] names a policy (parsable from config strings),
//! [`CacheBuilder`] collects the capacity and an optional eviction listener,
//! and [`Cache`] wraps whichever concrete cache was built behind one type.
//!
//! ```text
//!   "lru" ──parse──► CachePolicy::Lru
//!                          │
//!   CacheBuilder::new()    │
//!     .capacity(2)         │
//!     .listener(log) ──────┴──build──► Cache<K, V>
//!                                        │
//!                                        ├── Unbounded(UnboundedCache)
//!                                        ├── Lifo(LifoCache)
//!                                        ├── Lru(LruCache)
//!                                        ├── Mru(MruCache)
//!                                        └── Lfu(LfuCache)
//! ```
//!
//! ```
//! use evictkit::builder::{Cache, CacheBuilder, CachePolicy};
//! use evictkit::listener::DiscardLog;
//! use evictkit::traits::{CoreCache, ReadOnlyCache};
//!
//! let policy: CachePolicy = "MRU".parse().unwrap();
//! let log = DiscardLog::new();
//! let mut cache: Cache<&str, u32> = CacheBuilder::new()
//!     .capacity(2)
//!     .listener(log.clone())
//!     .build(policy);
//!
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A");
//! cache.put("C", 3);
//!
//! assert_eq!(log.keys(), vec!["A"]);
//! assert_eq!(cache.len(), 2);
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::dump::Dump;
use crate::error::{ConfigError, InvariantError};
use crate::listener::EvictionListener;
use crate::policy::lfu::LfuCache;
use crate::policy::lifo::LifoCache;
use crate::policy::lru::LruCache;
use crate::policy::mru::MruCache;
use crate::policy::unbounded::UnboundedCache;
use crate::policy::{nonzero_capacity, DEFAULT_CAPACITY};
use crate::traits::{CoreCache, ReadOnlyCache};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// No limit, no eviction.
    Unbounded,
    /// Evict the newest insertion.
    Lifo,
    /// Evict the least recently used key.
    Lru,
    /// Evict the most recently used key.
    Mru,
    /// Evict the least frequently used key, least recent among equals.
    Lfu,
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 5] = [
        CachePolicy::Unbounded,
        CachePolicy::Lifo,
        CachePolicy::Lru,
        CachePolicy::Mru,
        CachePolicy::Lfu,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CachePolicy::Unbounded => "unbounded",
            CachePolicy::Lifo => "lifo",
            CachePolicy::Lru => "lru",
            CachePolicy::Mru => "mru",
            CachePolicy::Lfu => "lfu",
        }
    }

    /// `false` only for [`CachePolicy::Unbounded`].
    pub fn is_bounded(self) -> bool {
        self != CachePolicy::Unbounded
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    /// Case-insensitive; `basic` is accepted as an alias for `unbounded`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unbounded" | "basic" => Ok(CachePolicy::Unbounded),
            "lifo" => Ok(CachePolicy::Lifo),
            "lru" => Ok(CachePolicy::Lru),
            "mru" => Ok(CachePolicy::Mru),
            "lfu" => Ok(CachePolicy::Lfu),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Cache of any policy behind one type.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Unbounded(UnboundedCache<K, V>),
    Lifo(LifoCache<K, V>),
    Lru(LruCache<K, V>),
    Mru(MruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Unbounded(_) => CachePolicy::Unbounded,
            CacheInner::Lifo(_) => CachePolicy::Lifo,
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Mru(_) => CachePolicy::Mru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }

    /// Keys from next-to-evict to last-to-evict; arbitrary for unbounded.
    pub fn keys(&self) -> Vec<&K> {
        match &self.inner {
            CacheInner::Unbounded(c) => c.keys().collect(),
            CacheInner::Lifo(c) => c.keys().collect(),
            CacheInner::Lru(c) => c.keys().collect(),
            CacheInner::Mru(c) => c.keys().collect(),
            CacheInner::Lfu(c) => c.keys().collect(),
        }
    }

    /// The key the next overflowing `put` would evict.
    pub fn peek_victim(&self) -> Option<&K> {
        match &self.inner {
            CacheInner::Unbounded(c) => c.peek_victim(),
            CacheInner::Lifo(c) => c.peek_victim(),
            CacheInner::Lru(c) => c.peek_victim(),
            CacheInner::Mru(c) => c.peek_victim(),
            CacheInner::Lfu(c) => c.peek_victim(),
        }
    }

    /// Use count of `key`; only LFU tracks one.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        match &self.inner {
            CacheInner::Lfu(c) => c.frequency(key),
            _ => None,
        }
    }

    pub fn dump(&self) -> Dump<'_, K, V>
    where
        K: Ord,
    {
        match &self.inner {
            CacheInner::Unbounded(c) => c.dump(),
            CacheInner::Lifo(c) => c.dump(),
            CacheInner::Lru(c) => c.dump(),
            CacheInner::Mru(c) => c.dump(),
            CacheInner::Lfu(c) => c.dump(),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match &self.inner {
            CacheInner::Unbounded(c) => c.check_invariants(),
            CacheInner::Lifo(c) => c.check_invariants(),
            CacheInner::Lru(c) => c.check_invariants(),
            CacheInner::Mru(c) => c.check_invariants(),
            CacheInner::Lfu(c) => c.check_invariants(),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            CacheInner::Unbounded(c) => fmt::Debug::fmt(c, f),
            CacheInner::Lifo(c) => fmt::Debug::fmt(c, f),
            CacheInner::Lru(c) => fmt::Debug::fmt(c, f),
            CacheInner::Mru(c) => fmt::Debug::fmt(c, f),
            CacheInner::Lfu(c) => fmt::Debug::fmt(c, f),
        }
    }
}

impl<K, V> ReadOnlyCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Unbounded(c) => c.contains(key),
            CacheInner::Lifo(c) => c.contains(key),
            CacheInner::Lru(c) => c.contains(key),
            CacheInner::Mru(c) => c.contains(key),
            CacheInner::Lfu(c) => c.contains(key),
        }
    }

    fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Unbounded(c) => c.peek(key),
            CacheInner::Lifo(c) => c.peek(key),
            CacheInner::Lru(c) => c.peek(key),
            CacheInner::Mru(c) => c.peek(key),
            CacheInner::Lfu(c) => c.peek(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Unbounded(c) => c.len(),
            CacheInner::Lifo(c) => c.len(),
            CacheInner::Lru(c) => c.len(),
            CacheInner::Mru(c) => c.len(),
            CacheInner::Lfu(c) => c.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Unbounded(c) => c.capacity(),
            CacheInner::Lifo(c) => c.capacity(),
            CacheInner::Lru(c) => c.capacity(),
            CacheInner::Mru(c) => c.capacity(),
            CacheInner::Lfu(c) => c.capacity(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Unbounded(c) => c.put(key, value),
            CacheInner::Lifo(c) => c.put(key, value),
            CacheInner::Lru(c) => c.put(key, value),
            CacheInner::Mru(c) => c.put(key, value),
            CacheInner::Lfu(c) => c.put(key, value),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Unbounded(c) => c.get(key),
            CacheInner::Lifo(c) => c.get(key),
            CacheInner::Lru(c) => c.get(key),
            CacheInner::Mru(c) => c.get(key),
            CacheInner::Lfu(c) => c.get(key),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Unbounded(c) => c.clear(),
            CacheInner::Lifo(c) => c.clear(),
            CacheInner::Lru(c) => c.clear(),
            CacheInner::Mru(c) => c.clear(),
            CacheInner::Lfu(c) => c.clear(),
        }
    }
}

/// Builder for [`Cache`] instances.
pub struct CacheBuilder<K, V> {
    capacity: usize,
    listener: Option<Box<dyn EvictionListener<K, V>>>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Starts from [`DEFAULT_CAPACITY`] and no listener.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            listener: None,
        }
    }

    /// Maximum entries for bounded policies; a sizing hint for unbounded.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Listener called for every eviction. Unbounded caches never call it.
    pub fn listener<L>(mut self, listener: L) -> Self
    where
        L: EvictionListener<K, V> + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Builds the cache; a zero capacity gives a bounded cache that drops
    /// every insert.
    pub fn build(self, policy: CachePolicy) -> Cache<K, V> {
        let capacity = self.capacity;
        let mut inner = match policy {
            CachePolicy::Unbounded => {
                CacheInner::Unbounded(UnboundedCache::with_capacity(capacity))
            },
            CachePolicy::Lifo => CacheInner::Lifo(LifoCache::new(capacity)),
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(capacity)),
            CachePolicy::Mru => CacheInner::Mru(MruCache::new(capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(capacity)),
        };

        if let Some(listener) = self.listener {
            match &mut inner {
                CacheInner::Unbounded(_) => {},
                CacheInner::Lifo(c) => c.set_listener(listener),
                CacheInner::Lru(c) => c.set_listener(listener),
                CacheInner::Mru(c) => c.set_listener(listener),
                CacheInner::Lfu(c) => c.set_listener(listener),
            }
        }

        Cache { inner }
    }

    /// Like [`build`](Self::build), but rejects a zero capacity for bounded
    /// policies.
    pub fn try_build(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError> {
        if policy.is_bounded() {
            nonzero_capacity(self.capacity)?;
        }
        Ok(self.build(policy))
    }
}

impl<K, V> Default for CacheBuilder<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for CacheBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("capacity", &self.capacity)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
