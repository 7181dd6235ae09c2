//! Metrics for the TTL cache (feature `metrics`).
//!
//! - [`traits`]: recorder, snapshot-provider and exporter traits
//! - [`metrics_impl`]: counters kept under the cache lock
//! - [`snapshot`]: plain copies of the counters
//! - [`exporter`]: Prometheus text exporter

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::TtlMetrics;
pub use snapshot::TtlMetricsSnapshot;
pub use traits::{
    CoreMetricsRecorder, MetricsExporter, MetricsReset, MetricsSnapshotProvider,
    TtlMetricsRecorder,
};
