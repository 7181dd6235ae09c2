use crate::metrics::snapshot::TtlMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsRecorder, TtlMetricsRecorder};

/// Counters for [`TtlCache`](crate::policy::ttl::TtlCache).
///
/// Lives inside the cache's lock, so plain integers suffice.
#[derive(Debug, Default, Clone)]
pub struct TtlMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub has_calls: u64,
    pub has_hits: u64,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub evicted_entries: u64,
    pub lazy_evictions: u64,
    pub sweep_runs: u64,
    pub swept_entries: u64,
    pub explicit_expires: u64,
    pub clear_calls: u64,
}

impl TtlMetrics {
    /// Copies the counters, filling in the gauges supplied by the caller.
    pub fn snapshot(&self, cache_len: usize, clean_interval_secs: u64) -> TtlMetricsSnapshot {
        TtlMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            has_calls: self.has_calls,
            has_hits: self.has_hits,
            insert_calls: self.insert_calls,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            touch_calls: self.touch_calls,
            touch_found: self.touch_found,
            evicted_entries: self.evicted_entries,
            lazy_evictions: self.lazy_evictions,
            sweep_runs: self.sweep_runs,
            swept_entries: self.swept_entries,
            explicit_expires: self.explicit_expires,
            clear_calls: self.clear_calls,
            cache_len,
            clean_interval_secs,
        }
    }
}

impl CoreMetricsRecorder for TtlMetrics {
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

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl TtlMetricsRecorder for TtlMetrics {
    fn record_has_call(&mut self) {
        self.has_calls += 1;
    }

    fn record_has_hit(&mut self) {
        self.has_hits += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }

    fn record_lazy_eviction(&mut self) {
        self.lazy_evictions += 1;
        self.evicted_entries += 1;
    }

    fn record_sweep_run(&mut self) {
        self.sweep_runs += 1;
    }

    fn record_swept_entries(&mut self, count: u64) {
        self.swept_entries += count;
        self.evicted_entries += count;
    }

    fn record_explicit_expire(&mut self, count: u64) {
        self.explicit_expires += count;
    }
}
