//! Cache contract shared by every eviction policy.
//!
//! ```text
//!   ┌──────────────────────────────────────────┐
//!   │          ReadOnlyCache<K, V>             │
//!   │  contains / peek / len / is_empty        │
//!   │  capacity                                │
//!   │  (never touches policy metadata)         │
//!   └────────────────────┬─────────────────────┘
//!                        │
//!                        ▼
//!   ┌──────────────────────────────────────────┐
//!   │            CoreCache<K, V>               │
//!   │  put(K, V) → Option<V>                   │
//!   │  get(&K) → Option<&V>                    │
//!   │  put_opt / get_opt (None is ignored)     │
//!   │  clear()                                 │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! | Policy     | `get` updates         | Victim on overflow                     |
//! |------------|-----------------------|----------------------------------------|
//! | Unbounded  | nothing               | none                                   |
//! | LIFO       | nothing               | last key inserted before this put      |
//! | LRU        | recency               | least recently used                    |
//! | MRU        | recency               | most recently used                     |
//! | LFU        | frequency + recency   | lowest frequency, then least recent    |
//!
//! The capacity check only runs when a `put` brings in a new key; updating a
//! key that is already cached never evicts. Each eviction is reported through
//! the cache's discard notifier (see [`crate::listener`]).
//!
//! None of these types synchronize internally. Wrap a cache in a mutex if it
//! has to be shared.

/// Read-only queries that leave eviction order untouched.
pub trait ReadOnlyCache<K, V> {
    /// Returns `true` if `key` is cached.
    fn contains(&self, key: &K) -> bool;

    /// Returns the value for `key` without counting it as an access.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Number of cached entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries; `usize::MAX` for unbounded caches.
    fn capacity(&self) -> usize;
}

/// The `{put, get}` capability every policy implements.
///
/// # Example
///
/// ```
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::{CoreCache, ReadOnlyCache};
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, rows: &[(u64, &str)]) {
///     for (k, v) in rows {
///         cache.put(*k, v.to_string());
///     }
/// }
///
/// let mut cache = LruCache::new(2);
/// warm(&mut cache, &[(1, "one"), (2, "two"), (3, "three")]);
/// assert_eq!(cache.len(), 2);
/// assert!(!cache.contains(&1));
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts or updates `key`, returning the previous value on update.
    ///
    /// Inserting a new key into a full cache first evicts exactly one victim
    /// chosen by the policy and emits a discard notification for it.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`, recording the access for policies that track usage.
    ///
    /// A miss changes nothing.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Drops every entry without discard notifications.
    fn clear(&mut self);

    /// [`put`](Self::put) for callers holding optional inputs.
    ///
    /// A missing key or value is ignored: nothing is inserted, nothing is
    /// evicted, and no notification is emitted.
    ///
    /// ```
    /// use evictkit::policy::mru::MruCache;
    /// use evictkit::traits::{CoreCache, ReadOnlyCache};
    ///
    /// let mut cache: MruCache<&str, i32> = MruCache::default();
    /// cache.put_opt(None, Some(1));
    /// cache.put_opt(Some("a"), None);
    /// assert!(cache.is_empty());
    ///
    /// cache.put_opt(Some("a"), Some(1));
    /// assert_eq!(cache.get(&"a"), Some(&1));
    /// ```
    fn put_opt(&mut self, key: Option<K>, value: Option<V>) -> Option<V> {
        match (key, value) {
            (Some(key), Some(value)) => self.put(key, value),
            _ => {
                tracing::trace!("put ignored: key or value missing");
                None
            },
        }
    }

    /// [`get`](Self::get) for callers holding an optional key; `None` is a miss.
    fn get_opt(&mut self, key: Option<&K>) -> Option<&V> {
        match key {
            Some(key) => self.get(key),
            None => None,
        }
    }
}
