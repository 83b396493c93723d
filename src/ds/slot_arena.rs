//! Index-stable arena with slot reuse.
//!
//! Values live in a `Vec<Option<T>>`; removed slots are pushed onto a free
//! list and recycled by later inserts. A [`SlotId`] stays valid until its
//! value is removed, which lets linked structures refer to nodes by index
//! instead of by pointer.
//!
//! ```
//! use evictkit::ds::SlotArena;
//!
//! let mut arena = SlotArena::new();
//! let a = arena.insert("a");
//! let b = arena.insert("b");
//! assert_eq!(arena.remove(a), Some("a"));
//!
//! // Freed slot is reused.
//! let c = arena.insert("c");
//! assert_eq!(c, a);
//! assert_eq!(arena.get(b), Some(&"b"));
//! assert_eq!(arena.len(), 2);
//! ```

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Vec-backed arena that recycles freed slots.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an arena with room for `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle, reusing a freed slot if one exists.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(value);
                idx
            },
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            },
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Removes the value at `id`. Returns `None` for a stale or unknown handle.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value and forgets all slots; outstanding handles become stale.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Iterates occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut arena = SlotArena::new();
        let a = arena.insert(10);
        let b = arena.insert(20);

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&10));
        assert_eq!(arena.get(b), Some(&20));

        assert_eq!(arena.remove(a), Some(10));
        assert_eq!(arena.get(a), None);
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn double_remove_is_none() {
        let mut arena = SlotArena::new();
        let a = arena.insert("x");
        assert_eq!(arena.remove(a), Some("x"));
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = SlotArena::with_capacity(4);
        let a = arena.insert(1);
        let _b = arena.insert(2);
        arena.remove(a);

        let c = arena.insert(3);
        assert_eq!(c, a);
        assert_eq!(arena.get(c), Some(&3));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = SlotArena::new();
        let id = arena.insert(String::from("old"));
        if let Some(value) = arena.get_mut(id) {
            value.push_str("-new");
        }
        assert_eq!(arena.get(id).map(String::as_str), Some("old-new"));
    }

    #[test]
    fn iter_skips_free_slots() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.remove(b);

        let seen: Vec<_> = arena.iter().collect();
        assert_eq!(seen, vec![(a, &'a'), (c, &'c')]);
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut arena = SlotArena::new();
        let a = arena.insert(1);
        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(a));
        assert_eq!(arena.get(a), None);
    }

    #[test]
    fn unknown_handle_is_harmless() {
        let mut arena: SlotArena<u8> = SlotArena::new();
        let bogus = SlotId(42);
        assert_eq!(arena.get(bogus), None);
        assert_eq!(arena.get_mut(bogus), None);
        assert_eq!(arena.remove(bogus), None);
    }
}
