//! evictkit: bounded key-value caches with pluggable eviction policies.
//!
//! Five policies share the [`CoreCache`](traits::CoreCache) contract:
//! unbounded, LIFO, LRU, MRU, and LFU with least-recent tie-breaking. Each
//! eviction emits a `DISCARD` tracing event and reaches an optional
//! [`EvictionListener`](listener::EvictionListener).
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A");
//! cache.put("C", 3);
//!
//! assert!(cache.contains(&"A"));
//! assert!(!cache.contains(&"B"));
//! ```

pub mod builder;
pub mod ds;
pub mod dump;
pub mod error;
pub mod listener;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

mod store;
