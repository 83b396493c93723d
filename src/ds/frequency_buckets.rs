//! Frequency buckets for O(1) LFU bookkeeping with LRU tie-breaking.
//!
//! Every tracked key sits in exactly one bucket, the bucket for its current
//! frequency. Buckets form a doubly linked chain in ascending frequency order,
//! and each bucket holds its keys in a doubly linked list ordered by recency
//! (head = most recently touched, tail = least recently touched).
//!
//! ```text
//!   index: FxHashMap<K, SlotId>        entries: SlotArena<Entry<K>>
//!
//!   min_freq = Some(0)
//!        │
//!        ▼
//!   freq=0: head ──► [C] ◄──► [B] ◄── tail      (B evicted first)
//!        │
//!      next
//!        ▼
//!   freq=2: head ──► [A] ◄── tail
//! ```
//!
//! New keys enter at frequency 0 as the head of bucket 0. A touch unlinks the
//! key, bumps its frequency by one, and pushes it to the head of the next
//! bucket, creating that bucket between its neighbours when needed. The
//! eviction candidate is always the tail of the `min_freq` bucket, so ties on
//! frequency fall to the key touched longest ago.
//!
//! ```
//! use evictkit::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("a");
//! freq.insert("b");
//! freq.insert("c");
//! freq.touch(&"a");
//!
//! assert_eq!(freq.frequency(&"a"), Some(1));
//! assert_eq!(freq.pop_min(), Some(("b", 0)));
//! assert_eq!(freq.pop_min(), Some(("c", 0)));
//! assert_eq!(freq.pop_min(), Some(("a", 1)));
//! assert_eq!(freq.pop_min(), None);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Entry<K> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// O(1) LFU metadata tracker: lowest frequency first, LRU among equals.
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    entries: SlotArena<Entry<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    min_freq: Option<u64>,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            min_freq: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Current frequency of `key`, or `None` if it is not tracked.
    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Lowest frequency among tracked keys.
    pub fn min_freq(&self) -> Option<u64> {
        self.min_freq
    }

    /// Starts tracking `key` at frequency 0 as the most recent of its bucket.
    ///
    /// Returns `false` and leaves the key untouched if it is already tracked.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 0,
            key: key.clone(),
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&0) {
            // Bucket 0 is always the lowest, so it links in front of the old minimum.
            self.insert_bucket(0, None, self.min_freq);
        }
        self.list_push_front(0, id);
        self.min_freq = Some(0);
        true
    }

    /// Bumps the frequency of `key` by one and makes it the most recent key of
    /// its new bucket. Returns the new frequency.
    ///
    /// A key already at `u64::MAX` keeps its frequency and is only refreshed.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let current = self.entries.get(id)?.freq;

        if current == u64::MAX {
            self.list_remove(current, id)?;
            self.list_push_front(current, id);
            return Some(current);
        }
        let next_freq = current + 1;

        let (prev_existing, next_existing) = {
            let bucket = self.buckets.get(&current)?;
            (bucket.prev, bucket.next)
        };

        self.list_remove(current, id)?;
        let emptied = self.bucket_is_empty(current);
        if emptied {
            self.remove_bucket(current, prev_existing, next_existing);
        }

        if !self.buckets.contains_key(&next_freq) {
            let prev = if emptied {
                prev_existing
            } else {
                Some(current)
            };
            self.insert_bucket(next_freq, prev, next_existing);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.list_push_front(next_freq, id);

        if emptied && self.min_freq == Some(current) {
            self.min_freq = Some(next_freq);
        }
        Some(next_freq)
    }

    /// Stops tracking `key`. Returns the frequency it had.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let freq = self.unlink(id)?;
        self.index.remove(key);
        self.entries.remove(id).map(|_| freq)
    }

    /// Eviction candidate: tail of the lowest-frequency bucket.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let freq = self.min_freq?;
        let id = self.buckets.get(&freq)?.tail?;
        self.entries.get(id).map(|entry| (&entry.key, entry.freq))
    }

    /// Removes and returns the eviction candidate.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let freq = self.min_freq?;
        let id = self.buckets.get(&freq)?.tail?;
        self.unlink(id)?;
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.freq))
    }

    /// Iterates `(key, frequency)` from the next victim to the last.
    pub fn iter_eviction_order(&self) -> EvictionOrder<'_, K> {
        let bucket = self.min_freq;
        let current = bucket.and_then(|f| self.buckets.get(&f)).and_then(|b| b.tail);
        EvictionOrder {
            buckets: self,
            bucket,
            current,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = None;
    }

    /// Checks index, bucket chain, and per-bucket lists for consistency.
    pub fn validate(&self) -> Result<(), String> {
        if self.entries.len() != self.index.len() {
            return Err(format!(
                "{} entries but {} indexed keys",
                self.entries.len(),
                self.index.len()
            ));
        }
        if self.is_empty() {
            if !self.buckets.is_empty() || self.min_freq.is_some() {
                return Err("empty tracker still holds buckets".into());
            }
            return Ok(());
        }

        let min = self.min_freq.ok_or("non-empty tracker without min_freq")?;
        let mut seen = 0usize;
        let mut bucket_freq = Some(min);
        let mut prev_freq: Option<u64> = None;
        while let Some(freq) = bucket_freq {
            let bucket = self
                .buckets
                .get(&freq)
                .ok_or_else(|| format!("bucket {freq} linked but missing"))?;
            if bucket.prev != prev_freq {
                return Err(format!("bucket {freq} has a stale prev link"));
            }
            if prev_freq.is_some_and(|p| p >= freq) {
                return Err(format!("bucket chain not ascending at {freq}"));
            }
            if bucket.head.is_none() {
                return Err(format!("bucket {freq} is empty but still linked"));
            }

            let mut last = None;
            let mut current = bucket.head;
            while let Some(id) = current {
                let entry = self
                    .entries
                    .get(id)
                    .ok_or_else(|| format!("bucket {freq} links a freed slot"))?;
                if entry.freq != freq {
                    return Err(format!("entry in bucket {freq} has freq {}", entry.freq));
                }
                if entry.prev != last {
                    return Err(format!("bucket {freq} list has a stale prev link"));
                }
                if self.index.get(&entry.key) != Some(&id) {
                    return Err(format!("bucket {freq} entry not indexed"));
                }
                seen += 1;
                if seen > self.entries.len() {
                    return Err("cycle detected".into());
                }
                last = Some(id);
                current = entry.next;
            }
            if bucket.tail != last {
                return Err(format!("bucket {freq} tail mismatch"));
            }

            prev_freq = Some(freq);
            bucket_freq = bucket.next;
        }

        if seen != self.entries.len() {
            return Err(format!(
                "{seen} entries reachable but {} tracked",
                self.entries.len()
            ));
        }
        let linked_buckets = self.buckets.len();
        let mut chain_len = 0usize;
        let mut walk = Some(min);
        while let Some(f) = walk {
            chain_len += 1;
            walk = self.buckets.get(&f).and_then(|b| b.next);
        }
        if chain_len != linked_buckets {
            return Err("orphan buckets outside the chain".into());
        }
        Ok(())
    }

    /// Unlinks `id` from its bucket, dropping the bucket if it empties.
    fn unlink(&mut self, id: SlotId) -> Option<u64> {
        let freq = self.entries.get(id)?.freq;
        let (prev, next) = {
            let bucket = self.buckets.get(&freq)?;
            (bucket.prev, bucket.next)
        };
        self.list_remove(freq, id)?;
        if self.bucket_is_empty(freq) {
            self.remove_bucket(freq, prev, next);
            if self.min_freq == Some(freq) {
                self.min_freq = next;
            }
        }
        Some(freq)
    }

    fn bucket_is_empty(&self, freq: u64) -> bool {
        self.buckets
            .get(&freq)
            .map_or(true, |bucket| bucket.head.is_none())
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );
        if let Some(prev_bucket) = prev.and_then(|p| self.buckets.get_mut(&p)) {
            prev_bucket.next = Some(freq);
        }
        if let Some(next_bucket) = next.and_then(|n| self.buckets.get_mut(&n)) {
            next_bucket.prev = Some(freq);
        }
    }

    fn remove_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(prev_bucket) = prev.and_then(|p| self.buckets.get_mut(&p)) {
            prev_bucket.next = next;
        }
        if let Some(next_bucket) = next.and_then(|n| self.buckets.get_mut(&n)) {
            next_bucket.prev = prev;
        }
        self.buckets.remove(&freq);
    }

    fn list_push_front(&mut self, freq: u64, id: SlotId) {
        let Some(bucket) = self.buckets.get_mut(&freq) else {
            return;
        };
        let old_head = bucket.head;
        bucket.head = Some(id);
        if old_head.is_none() {
            bucket.tail = Some(id);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(old) = old_head.and_then(|h| self.entries.get_mut(h)) {
            old.prev = Some(id);
        }
    }

    fn list_remove(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.prev, entry.next)
        };

        let bucket = self.buckets.get_mut(&freq)?;
        if prev.is_none() {
            bucket.head = next;
        }
        if next.is_none() {
            bucket.tail = prev;
        }
        if let Some(entry) = prev.and_then(|p| self.entries.get_mut(p)) {
            entry.next = next;
        }
        if let Some(entry) = next.and_then(|n| self.entries.get_mut(n)) {
            entry.prev = prev;
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }
        Some(())
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`FrequencyBuckets::iter_eviction_order`].
pub struct EvictionOrder<'a, K> {
    buckets: &'a FrequencyBuckets<K>,
    bucket: Option<u64>,
    current: Option<SlotId>,
}

impl<'a, K> Iterator for EvictionOrder<'a, K> {
    type Item = (&'a K, u64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.current {
                let entry = self.buckets.entries.get(id)?;
                self.current = entry.prev;
                return Some((&entry.key, entry.freq));
            }
            let freq = self.bucket?;
            self.bucket = self.buckets.buckets.get(&freq)?.next;
            self.current = self
                .bucket
                .and_then(|f| self.buckets.buckets.get(&f))
                .and_then(|b| b.tail);
        }
    }
}
