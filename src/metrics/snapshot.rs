/// Point-in-time copy of the TTL cache counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TtlMetricsSnapshot {
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
    pub lazy_evictions: u64, // expired entries dropped by has/get/touch
    pub sweep_runs: u64,
    pub swept_entries: u64,
    pub explicit_expires: u64,
    pub clear_calls: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub clean_interval_secs: u64,
}
