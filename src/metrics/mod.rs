//! Operation counters, compiled in with the `metrics` feature.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::CoreOnlyMetrics;
pub use snapshot::CoreOnlyMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
