//! Human-readable listing of cache contents.
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LruCache::new(4);
//! cache.put("B", "world");
//! cache.put("A", "Hello");
//!
//! assert_eq!(cache.dump().to_string(), "Current cache:\nA: Hello\nB: world\n");
//! ```

use std::fmt;

/// [`Display`](fmt::Display) adapter that prints one `key: value` line per
/// entry, keys ascending, under a `Current cache:` header.
pub struct Dump<'a, K, V> {
    entries: Vec<(&'a K, &'a V)>,
}

/// Collects `entries` and sorts them by key.
pub fn dump<'a, K, V, I>(entries: I) -> Dump<'a, K, V>
where
    K: Ord + 'a,
    V: 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut entries: Vec<_> = entries.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    Dump { entries }
}

impl<K, V> Dump<'_, K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> fmt::Display for Dump<'_, K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current cache:")?;
        for (key, value) in &self.entries {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for Dump<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().copied()).finish()
    }
}
