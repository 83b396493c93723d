//! Key/value store with a single ordering list, shared by the list-ordered
//! policies (LIFO, LRU, MRU).
//!
//! ```text
//!   map: FxHashMap<K, Slot<V>>             order: IntrusiveList<K>
//!   ┌───────┬─────────────────────┐
//!   │  key  │ Slot { value, node }│        front                        back
//!   ├───────┼─────────────────────┤          │                            │
//!   │  "a"  │ { 1, id_2 } ────────┼──┐       ▼                            ▼
//!   │  "b"  │ { 2, id_0 } ────────┼──┼──►  [id_2:"a"] ◄──► [id_1:"c"] ◄──► [id_0:"b"]
//!   │  "c"  │ { 3, id_1 } ────────┼──┘
//!   └───────┴─────────────────────┘
//! ```
//!
//! The store does not interpret the order; each policy decides what the front
//! means (most recent insertion for LIFO, most recent use for LRU/MRU) and
//! which end it evicts from.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::{IntrusiveList, Iter};
use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
struct Slot<V> {
    value: V,
    node: SlotId,
}

#[derive(Debug)]
pub(crate) struct LinkedStore<K, V> {
    map: FxHashMap<K, Slot<V>>,
    order: IntrusiveList<K>,
}

impl<K, V> LinkedStore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    pub(crate) fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|slot| &slot.value)
    }

    /// Swaps the value of a cached key in place, leaving the order alone.
    pub(crate) fn replace(&mut self, key: &K, value: V) -> Option<V> {
        self.map
            .get_mut(key)
            .map(|slot| std::mem::replace(&mut slot.value, value))
    }

    /// Moves `key` to the front and returns its value.
    pub(crate) fn promote(&mut self, key: &K) -> Option<&V> {
        let slot = self.map.get(key)?;
        self.order.move_to_front(slot.node);
        Some(&slot.value)
    }

    /// Links a key that is not yet cached at the front.
    pub(crate) fn push_front(&mut self, key: K, value: V) {
        debug_assert!(!self.map.contains_key(&key), "push_front on cached key");
        let node = self.order.push_front(key.clone());
        self.map.insert(key, Slot { value, node });
    }

    pub(crate) fn front(&self) -> Option<&K> {
        self.order.front()
    }

    pub(crate) fn back(&self) -> Option<&K> {
        self.order.back()
    }

    pub(crate) fn pop_front(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_front()?;
        self.map.remove(&key).map(|slot| (key, slot.value))
    }

    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_back()?;
        self.map.remove(&key).map(|slot| (key, slot.value))
    }

    /// Keys from front to back.
    pub(crate) fn keys_from_front(&self) -> Iter<'_, K> {
        self.order.iter()
    }

    /// Keys from back to front.
    pub(crate) fn keys_from_back(&self) -> Iter<'_, K> {
        self.order.iter_rev()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.map.iter().map(|(k, slot)| (k, &slot.value))
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    /// Checks that the map and the order list describe the same key set.
    pub(crate) fn validate(&self) -> Result<(), String> {
        self.order.validate()?;
        if self.map.len() != self.order.len() {
            return Err(format!(
                "map holds {} keys but order list holds {}",
                self.map.len(),
                self.order.len()
            ));
        }
        for (key, slot) in &self.map {
            match self.order.get(slot.node) {
                Some(linked) if linked == key => {},
                Some(_) => return Err("map slot points at a different key".into()),
                None => return Err("map slot points at a dead list node".into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_to_back(store: &LinkedStore<&'static str, i32>) -> Vec<&'static str> {
        store.keys_from_front().copied().collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut store = LinkedStore::with_capacity(4);
        store.push_front("a", 1);
        store.push_front("b", 2);
        store.push_front("c", 3);

        assert_eq!(front_to_back(&store), vec!["c", "b", "a"]);
        assert_eq!(store.front(), Some(&"c"));
        assert_eq!(store.back(), Some(&"a"));
        store.validate().unwrap();
    }

    #[test]
    fn promote_moves_key_to_front() {
        let mut store = LinkedStore::with_capacity(4);
        store.push_front("a", 1);
        store.push_front("b", 2);
        store.push_front("c", 3);

        assert_eq!(store.promote(&"a"), Some(&1));
        assert_eq!(front_to_back(&store), vec!["a", "c", "b"]);
        assert_eq!(store.promote(&"zzz"), None);
        store.validate().unwrap();
    }

    #[test]
    fn replace_keeps_order() {
        let mut store = LinkedStore::with_capacity(2);
        store.push_front("a", 1);
        store.push_front("b", 2);

        assert_eq!(store.replace(&"a", 10), Some(1));
        assert_eq!(store.replace(&"x", 0), None);
        assert_eq!(store.peek(&"a"), Some(&10));
        assert_eq!(front_to_back(&store), vec!["b", "a"]);
    }

    #[test]
    fn pop_both_ends_remove_from_map() {
        let mut store = LinkedStore::with_capacity(3);
        store.push_front("a", 1);
        store.push_front("b", 2);
        store.push_front("c", 3);

        assert_eq!(store.pop_front(), Some(("c", 3)));
        assert_eq!(store.pop_back(), Some(("a", 1)));
        assert!(!store.contains(&"a"));
        assert!(!store.contains(&"c"));
        assert_eq!(store.len(), 1);
        store.validate().unwrap();
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut store = LinkedStore::with_capacity(2);
        store.push_front("a", 1);
        store.clear();
        assert_eq!(store.len(), 0);
        assert_eq!(store.front(), None);
        assert_eq!(store.pop_back(), None);
        store.validate().unwrap();
    }

    #[test]
    fn keys_from_back_reverses_order() {
        let mut store = LinkedStore::with_capacity(3);
        store.push_front("a", 1);
        store.push_front("b", 2);
        let rev: Vec<_> = store.keys_from_back().copied().collect();
        assert_eq!(rev, vec!["a", "b"]);
        let mut pairs: Vec<_> = store.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort();
        assert_eq!(pairs, vec![("a", 1), ("b", 2)]);
    }
}
