//! Recording and snapshot traits for cache counters.
//!
//! ```text
//!   ┌─────────────────────────────┐      ┌──────────────────────────────┐
//!   │     CoreMetricsRecorder     │      │ MetricsSnapshotProvider<S>   │
//!   │  get_hit/get_miss/insert    │      │ (tests, benches, demos)      │
//!   │  evict/clear                │      └──────────────────────────────┘
//!   └─────────────────────────────┘
//! ```
//!
//! Recorders only write counters; providers only read them. Every policy
//! records the same core set, so one recorder type serves all of them.

/// Counters every cache policy records.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
