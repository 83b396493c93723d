//! Eviction policies.
//!
//! | Module        | Type              | Victim on overflow                        |
//! |---------------|-------------------|-------------------------------------------|
//! | [`unbounded`] | `UnboundedCache`  | none                                      |
//! | [`lifo`]      | `LifoCache`       | key inserted most recently                |
//! | [`lru`]       | `LruCache`        | least recently used                       |
//! | [`mru`]       | `MruCache`        | most recently used                        |
//! | [`lfu`]       | `LfuCache`        | least frequently used, then least recent  |
//!
//! Every bounded type offers the same constructors: `new(capacity)`,
//! `default()` with [`DEFAULT_CAPACITY`], and `try_new(capacity)` which
//! rejects zero. `new(0)` builds a cache that silently drops every insert.

use crate::error::ConfigError;

pub mod lfu;
pub mod lifo;
pub mod lru;
pub mod mru;
pub mod unbounded;

/// Capacity used by `Default` and by [`CacheBuilder`](crate::builder::CacheBuilder).
pub const DEFAULT_CAPACITY: usize = 4;

pub(crate) fn nonzero_capacity(capacity: usize) -> Result<usize, ConfigError> {
    if capacity == 0 {
        Err(ConfigError::ZeroCapacity)
    } else {
        Ok(capacity)
    }
}
