use crate::metrics::snapshot::CoreOnlyMetricsSnapshot;
use crate::metrics::traits::CoreMetricsRecorder;

/// Plain counters shared by every policy.
#[derive(Debug, Default, Clone)]
pub struct CoreOnlyMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub clears: u64,
}

impl CoreOnlyMetrics {
    /// Copies the counters and attaches the gauges sampled by the caller.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CoreOnlyMetricsSnapshot {
        CoreOnlyMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evict_calls: self.evict_calls,
            evicted_entries: self.evicted_entries,
            clears: self.clears,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for CoreOnlyMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}
