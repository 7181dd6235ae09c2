use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::TtlMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        // Write errors are dropped.
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, name: &str, value: u64) {
        self.write_metric("counter", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        self.write_metric("gauge", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<TtlMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &TtlMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("has_calls_total", snapshot.has_calls),
            ("has_hits_total", snapshot.has_hits),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_new_total", snapshot.insert_new),
            ("insert_updates_total", snapshot.insert_updates),
            ("touch_calls_total", snapshot.touch_calls),
            ("touch_found_total", snapshot.touch_found),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("lazy_evictions_total", snapshot.lazy_evictions),
            ("sweep_runs_total", snapshot.sweep_runs),
            ("swept_entries_total", snapshot.swept_entries),
            ("explicit_expires_total", snapshot.explicit_expires),
            ("clear_calls_total", snapshot.clear_calls),
        ];
        for (suffix, value) in counters {
            self.write_counter(&self.metric_name(suffix), value);
        }
        self.write_gauge(&self.metric_name("cache_len"), snapshot.cache_len as u64);
        self.write_gauge(
            &self.metric_name("clean_interval_seconds"),
            snapshot.clean_interval_secs,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(prefix: &str, snapshot: &TtlMetricsSnapshot) -> String {
        let exporter = PrometheusTextExporter::new(prefix, Vec::new());
        exporter.export(snapshot);
        String::from_utf8(exporter.into_inner()).unwrap()
    }

    #[test]
    fn writes_prefixed_counters_and_gauges() {
        let snapshot = TtlMetricsSnapshot {
            get_hits: 3,
            cache_len: 7,
            clean_interval_secs: 600,
            ..TtlMetricsSnapshot::default()
        };
        let out = render("ttl", &snapshot);
        assert!(out.contains("# TYPE ttl_get_hits_total counter\nttl_get_hits_total 3\n"));
        assert!(out.contains("# TYPE ttl_cache_len gauge\nttl_cache_len 7\n"));
        assert!(out.contains("ttl_clean_interval_seconds 600\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let out = render("", &TtlMetricsSnapshot::default());
        assert!(out.contains("\nsweep_runs_total 0\n"));
        assert!(!out.contains("_sweep_runs_total"));
    }
}
