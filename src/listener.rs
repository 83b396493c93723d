//! Discard notifications: how a cache tells the outside world it evicted a key.
//!
//! Every policy-driven eviction produces two observable events:
//!
//! 1. a `tracing` event at `INFO` on target `evictkit::discard`, with the
//!    message `DISCARD: <key>` and `policy`/`key` fields;
//! 2. a call to the cache's [`EvictionListener`], if one is installed.
//!
//! `clear()` drops entries without notification; only capacity evictions are
//! discards.
//!
//! ```
//! use evictkit::listener::DiscardLog;
//! use evictkit::policy::lifo::LifoCache;
//! use evictkit::traits::CoreCache;
//!
//! let log = DiscardLog::new();
//! let mut cache = LifoCache::new(2).with_listener(log.clone());
//!
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.put("C", 3);
//!
//! assert_eq!(log.keys(), vec!["B"]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Target used for discard events.
pub const DISCARD_TARGET: &str = "evictkit::discard";

/// Callback invoked once per evicted entry.
///
/// Runs synchronously inside `put`, after the victim has been removed from the
/// cache and before the new key is inserted.
pub trait EvictionListener<K, V> {
    fn on_evict(&mut self, key: &K, value: &V);
}

/// An [`EvictionListener`] backed by a closure.
///
/// ```
/// use evictkit::listener::FnListener;
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = LruCache::new(1).with_listener(FnListener(|k: &u32, v: &&str| {
///     println!("DISCARD: {k} ({v})");
/// }));
/// cache.put(1, "one");
/// cache.put(2, "two");
/// ```
pub struct FnListener<F>(pub F);

impl<K, V, F> EvictionListener<K, V> for FnListener<F>
where
    F: FnMut(&K, &V),
{
    fn on_evict(&mut self, key: &K, value: &V) {
        (self.0)(key, value)
    }
}

/// Shared recorder of evicted keys.
///
/// Clones share the same log, so keep one handle and give a clone to the
/// cache.
#[derive(Debug)]
pub struct DiscardLog<K> {
    keys: Rc<RefCell<Vec<K>>>,
}

impl<K> DiscardLog<K> {
    pub fn new() -> Self {
        Self {
            keys: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Number of discards recorded so far.
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }

    /// Drains the log, returning discarded keys oldest first.
    pub fn take(&self) -> Vec<K> {
        std::mem::take(&mut *self.keys.borrow_mut())
    }
}

impl<K: Clone> DiscardLog<K> {
    /// Discarded keys, oldest first.
    pub fn keys(&self) -> Vec<K> {
        self.keys.borrow().clone()
    }

    pub fn last(&self) -> Option<K> {
        self.keys.borrow().last().cloned()
    }
}

impl<K> Clone for DiscardLog<K> {
    fn clone(&self) -> Self {
        Self {
            keys: Rc::clone(&self.keys),
        }
    }
}

impl<K> Default for DiscardLog<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V> EvictionListener<K, V> for DiscardLog<K> {
    fn on_evict(&mut self, key: &K, _value: &V) {
        self.keys.borrow_mut().push(key.clone());
    }
}

/// Per-cache notifier that every policy routes its evictions through.
pub(crate) struct Discard<K, V> {
    policy: &'static str,
    listener: Option<Box<dyn EvictionListener<K, V>>>,
}

impl<K, V> Discard<K, V> {
    pub(crate) fn new(policy: &'static str) -> Self {
        Self {
            policy,
            listener: None,
        }
    }

    pub(crate) fn set_listener(&mut self, listener: Box<dyn EvictionListener<K, V>>) {
        self.listener = Some(listener);
    }

    pub(crate) fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    pub(crate) fn notify(&mut self, key: &K, value: &V)
    where
        K: fmt::Debug,
    {
        tracing::info!(
            target: DISCARD_TARGET,
            policy = self.policy,
            key = ?key,
            "DISCARD: {:?}",
            key
        );
        if let Some(listener) = self.listener.as_mut() {
            listener.on_evict(key, value);
        }
    }
}

impl<K, V> fmt::Debug for Discard<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Discard")
            .field("policy", &self.policy)
            .field("listener", &self.has_listener())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discard_log_clones_share_storage() {
        let log: DiscardLog<&str> = DiscardLog::new();
        let mut handle = log.clone();
        EvictionListener::<&str, i32>::on_evict(&mut handle, &"a", &1);
        EvictionListener::<&str, i32>::on_evict(&mut handle, &"b", &2);

        assert_eq!(log.len(), 2);
        assert_eq!(log.last(), Some("b"));
        assert_eq!(log.take(), vec!["a", "b"]);
        assert!(log.is_empty());
    }

    #[test]
    fn fn_listener_forwards_key_and_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut listener = FnListener(move |k: &u8, v: &char| sink.borrow_mut().push((*k, *v)));
        listener.on_evict(&7, &'x');
        assert_eq!(*seen.borrow(), vec![(7, 'x')]);
    }

    #[test]
    fn notifier_without_listener_is_silent() {
        let mut discard: Discard<u32, u32> = Discard::new("lru");
        assert!(!discard.has_listener());
        discard.notify(&1, &1);
    }

    #[test]
    fn notifier_calls_installed_listener() {
        let log = DiscardLog::new();
        let mut discard: Discard<u32, &str> = Discard::new("mru");
        discard.set_listener(Box::new(log.clone()));
        discard.notify(&3, &"three");
        discard.notify(&4, &"four");
        assert_eq!(log.keys(), vec![3, 4]);
        assert!(format!("{discard:?}").contains("mru"));
    }
}
