pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::ds::{FrequencyBuckets, IntrusiveList, SlotArena, SlotId};
pub use crate::dump::{dump, Dump};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::listener::{DiscardLog, EvictionListener, FnListener, DISCARD_TARGET};
#[cfg(feature = "metrics")]
pub use crate::metrics::{CoreOnlyMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lifo::LifoCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::mru::MruCache;
pub use crate::policy::unbounded::UnboundedCache;
pub use crate::policy::DEFAULT_CAPACITY;
pub use crate::traits::{CoreCache, ReadOnlyCache};
