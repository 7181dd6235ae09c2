//! Name → value cache with time-to-live expiry.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          TtlCache<C> Layout                             │
//! │                                                                         │
//! │   shared: Arc<Shared<C>>                      sweeper: Mutex<Slot>      │
//! │   ┌───────────────────────────────────┐       ┌─────────────────────┐   │
//! │   │ clock: C                          │◄──────│ interval_secs       │   │
//! │   │ default_ttl: Ttl                  │ tick  │ running: Sweeper    │   │
//! │   │ state: Mutex<                     │       └─────────────────────┘   │
//! │   │   FxHashMap<String, CacheEntry>>  │                                 │
//! │   └───────────────────────────────────┘                                 │
//! │                                                                         │
//! │   CacheEntry { value, live_time: Ttl, expire_at: Expiry }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Expiry
//!
//! An entry is live while `expire_at > now`; `Expiry::Never` is always live.
//! Expired entries disappear two ways:
//!
//! - **Lazily**: `has`, `get`, `touch` and the mutation helpers delete an
//!   expired entry they run into.
//! - **Sweep**: `clean()` or the background sweeper deletes every expired
//!   entry at once.
//!
//! `has` demands one extra second (`expire_at > now + 1`), so an entry it
//! reports is still live for the `get` that follows, even if the sweeper
//! runs in between. Every other read uses `expire_at > now`.
//!
//! ## TTL Presets
//!
//! | Preset       | Seconds |
//! |--------------|---------|
//! | `Ttl::MIN`   | 10      |
//! | `Ttl::TINY`  | 60      |
//! | `Ttl::SHORT` | 300     |
//! | `Ttl::MEDIUM`| 600     |
//! | `Ttl::LONG`  | 3600    |
//! | `Ttl::Forever` | never expires |
//!
//! ## Mutation Helpers
//!
//! `increment`/`decrement` and `array_push`/`array_without` rewrite the entry
//! with its original `live_time`, so each call restarts the TTL window from
//! "now". Absent names are created with the cache's default TTL
//! (`array_without` is the exception: it returns `None` for absent names).
//!
//! ## Thread Safety
//!
//! `TtlCache` is `Send + Sync` when its clock is. All operations take one
//! short `parking_lot::Mutex` critical section.
//!
//! ## Example Usage
//!
//! ```
//! use contentkit::policy::ttl::{Ttl, TtlCache};
//! use contentkit::time::ManualClock;
//! use contentkit::value::Value;
//!
//! let clock = ManualClock::new(1_000);
//! let cache = TtlCache::with_clock(clock.clone());
//!
//! cache.set("token", Value::from("abc"), Ttl::Seconds(30));
//! assert!(cache.has("token"));
//!
//! clock.advance(31);
//! assert!(!cache.has("token"));
//!
//! assert_eq!(cache.increment("hits", 1.0), 1.0);
//! assert_eq!(cache.increment("hits", 10.0), 11.0);
//! ```

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TtlMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TtlMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider, TtlMetricsRecorder,
};
use crate::policy::sweeper::Sweeper;
use crate::time::SystemClock;
use crate::traits::Clock;
use crate::value::Value;

/// Shortest accepted sweep interval, in seconds.
pub const MIN_CLEAN_INTERVAL_SECS: u64 = 10;
/// Longest accepted sweep interval, in seconds.
pub const MAX_CLEAN_INTERVAL_SECS: u64 = 3600;
/// Sweep interval used when none is configured, in seconds.
pub const DEFAULT_CLEAN_INTERVAL_SECS: u64 = 600;

/// Time to live of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ttl {
    /// Expires this many seconds after it is written.
    Seconds(u64),
    /// Never expires.
    Forever,
}

impl Ttl {
    pub const MIN: Ttl = Ttl::Seconds(10);
    pub const TINY: Ttl = Ttl::Seconds(60);
    pub const SHORT: Ttl = Ttl::Seconds(300);
    pub const MEDIUM: Ttl = Ttl::Seconds(600);
    pub const LONG: Ttl = Ttl::Seconds(3600);

    /// Seconds to live, or `None` for [`Ttl::Forever`].
    pub fn as_secs(self) -> Option<u64> {
        match self {
            Ttl::Seconds(secs) => Some(secs),
            Ttl::Forever => None,
        }
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Ttl::MEDIUM
    }
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Ttl::Seconds(secs)
    }
}

/// Absolute expiry of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expiry {
    /// Expires once the clock reaches this epoch second.
    At(u64),
    Never,
}

impl Expiry {
    /// Expiry of an entry written at `now` with `ttl`.
    pub fn after(now: u64, ttl: Ttl) -> Self {
        match ttl {
            Ttl::Seconds(secs) => Expiry::At(now.saturating_add(secs)),
            Ttl::Forever => Expiry::Never,
        }
    }

    /// Strictly live: `expire_at > now`.
    #[inline]
    pub fn is_live(self, now: u64) -> bool {
        match self {
            Expiry::At(at) => at > now,
            Expiry::Never => true,
        }
    }

    /// Live for at least one more second: `expire_at > now + 1`.
    #[inline]
    pub fn outlives_next_second(self, now: u64) -> bool {
        match self {
            Expiry::At(at) => at > now.saturating_add(1),
            Expiry::Never => true,
        }
    }
}

/// One cached value with its expiry bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub live_time: Ttl,
    pub expire_at: Expiry,
}

impl CacheEntry {
    fn new(value: Value, live_time: Ttl, now: u64) -> Self {
        Self {
            value,
            live_time,
            expire_at: Expiry::after(now, live_time),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    entries: FxHashMap<String, CacheEntry>,
    #[cfg(feature = "metrics")]
    metrics: TtlMetrics,
}

impl State {
    /// Looks up `name`, deleting it if it has expired.
    fn live_entry(&mut self, name: &str, now: u64) -> Option<&mut CacheEntry> {
        let expired = match self.entries.get(name) {
            Some(entry) => !entry.expire_at.is_live(now),
            None => return None,
        };
        if expired {
            self.entries.remove(name);
            tracing::trace!(name, "evicted expired entry on access");
            #[cfg(feature = "metrics")]
            self.metrics.record_lazy_eviction();
            return None;
        }
        self.entries.get_mut(name)
    }

    fn insert(&mut self, name: &str, entry: CacheEntry) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();
        let _previous = self.entries.insert(name.to_owned(), entry);
        #[cfg(feature = "metrics")]
        if _previous.is_some() {
            self.metrics.record_insert_update();
        } else {
            self.metrics.record_insert_new();
        }
    }

    fn sweep(&mut self, now: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expire_at.is_live(now));
        let removed = before - self.entries.len();
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_sweep_run();
            self.metrics.record_swept_entries(removed as u64);
        }
        removed
    }
}

#[derive(Debug)]
struct Shared<C> {
    clock: C,
    default_ttl: Ttl,
    state: Mutex<State>,
}

impl<C: Clock> Shared<C> {
    fn sweep(&self) -> usize {
        let now = self.clock.now_secs();
        let removed = self.state.lock().sweep(now);
        if removed > 0 {
            tracing::debug!(removed, now, "swept expired cache entries");
        }
        removed
    }
}

#[derive(Debug)]
struct SweeperSlot {
    interval_secs: u64,
    running: Option<Sweeper>,
}

/// Clamps a sweep interval into `[MIN_CLEAN_INTERVAL_SECS, MAX_CLEAN_INTERVAL_SECS]`.
pub fn clamp_clean_interval(secs: u64) -> u64 {
    secs.clamp(MIN_CLEAN_INTERVAL_SECS, MAX_CLEAN_INTERVAL_SECS)
}

/// TTL cache of [`Value`]s keyed by name.
#[derive(Debug)]
pub struct TtlCache<C: Clock = SystemClock> {
    shared: Arc<Shared<C>>,
    sweeper: Mutex<SweeperSlot>,
}

impl TtlCache<SystemClock> {
    /// Creates a cache on the system clock with default settings and no
    /// background sweeper; call [`start_sweeper`](Self::start_sweeper) or use
    /// [`CacheBuilder`](crate::builder::CacheBuilder), which starts one.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TtlCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TtlCache<C> {
    /// Creates a cache on `clock` with default settings and no sweeper.
    pub fn with_clock(clock: C) -> Self {
        Self::from_parts(clock, Ttl::default(), DEFAULT_CLEAN_INTERVAL_SECS)
    }

    pub(crate) fn from_parts(clock: C, default_ttl: Ttl, clean_interval_secs: u64) -> Self {
        Self {
            shared: Arc::new(Shared {
                clock,
                default_ttl,
                state: Mutex::new(State::default()),
            }),
            sweeper: Mutex::new(SweeperSlot {
                interval_secs: clamp_clean_interval(clean_interval_secs),
                running: None,
            }),
        }
    }

    #[inline]
    fn now(&self) -> u64 {
        self.shared.clock.now_secs()
    }

    /// TTL applied by [`set_default`](Self::set_default) and by helpers that
    /// create entries.
    pub fn default_ttl(&self) -> Ttl {
        self.shared.default_ttl
    }

    /// Stores `value` under `name`, replacing any previous entry outright.
    pub fn set(&self, name: &str, value: Value, live_time: Ttl) {
        let entry = CacheEntry::new(value, live_time, self.now());
        self.shared.state.lock().insert(name, entry);
    }

    /// Stores `value` with the default TTL.
    pub fn set_default(&self, name: &str, value: Value) {
        self.set(name, value, self.shared.default_ttl);
    }

    /// Returns `true` if `name` holds an entry that stays live past the
    /// current second. An expired entry is deleted.
    pub fn has(&self, name: &str) -> bool {
        let now = self.now();
        let mut state = self.shared.state.lock();
        #[cfg(feature = "metrics")]
        state.metrics.record_has_call();
        let found = state
            .live_entry(name, now)
            .is_some_and(|entry| entry.expire_at.outlives_next_second(now));
        #[cfg(feature = "metrics")]
        if found {
            state.metrics.record_has_hit();
        }
        found
    }

    /// Returns a copy of the value under `name`. An expired entry is deleted.
    pub fn get(&self, name: &str) -> Option<Value> {
        let now = self.now();
        let mut state = self.shared.state.lock();
        let value = state
            .live_entry(name, now)
            .map(|entry| entry.value.clone());
        #[cfg(feature = "metrics")]
        if value.is_some() {
            state.metrics.record_get_hit();
        } else {
            state.metrics.record_get_miss();
        }
        value
    }

    /// Full entry under `name`, if live.
    pub fn entry(&self, name: &str) -> Option<CacheEntry> {
        let now = self.now();
        self.shared
            .state
            .lock()
            .live_entry(name, now)
            .map(|entry| entry.clone())
    }

    /// Pushes the expiry of `name` back by `live_time` seconds (defaults to
    /// the entry's own TTL). The extension adds to the current expiry rather
    /// than restarting from now.
    ///
    /// Returns `false` for absent, expired or never-expiring entries.
    pub fn touch(&self, name: &str, live_time: Option<u64>) -> bool {
        let now = self.now();
        let mut state = self.shared.state.lock();
        #[cfg(feature = "metrics")]
        state.metrics.record_touch_call();
        let Some(entry) = state.live_entry(name, now) else {
            return false;
        };
        let (Expiry::At(at), Ttl::Seconds(own)) = (entry.expire_at, entry.live_time) else {
            return false;
        };
        entry.expire_at = Expiry::At(at.saturating_add(live_time.unwrap_or(own)));
        #[cfg(feature = "metrics")]
        state.metrics.record_touch_found();
        true
    }

    /// Names of live entries, sorted.
    pub fn list(&self) -> Vec<String> {
        let now = self.now();
        let state = self.shared.state.lock();
        let mut names: Vec<String> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.expire_at.is_live(now))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Live entries keyed by name.
    pub fn list_entries(&self) -> BTreeMap<String, CacheEntry> {
        let now = self.now();
        self.shared
            .state
            .lock()
            .entries
            .iter()
            .filter(|(_, entry)| entry.expire_at.is_live(now))
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect()
    }

    /// Deletes every expired entry now. Returns how many were deleted.
    pub fn clean(&self) -> usize {
        self.shared.sweep()
    }

    /// Deletes the named entries regardless of their remaining TTL.
    /// Returns how many existed.
    pub fn expire<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.shared.state.lock();
        let removed = names
            .into_iter()
            .filter(|name| state.entries.remove(name.as_ref()).is_some())
            .count();
        #[cfg(feature = "metrics")]
        state.metrics.record_explicit_expire(removed as u64);
        removed
    }

    /// Deletes every entry.
    pub fn clear(&self) {
        let mut state = self.shared.state.lock();
        state.entries.clear();
        #[cfg(feature = "metrics")]
        state.metrics.record_clear();
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.shared.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.lock().entries.is_empty()
    }

    /// Adds `by` to the number under `name` and returns the result.
    ///
    /// Absent names start from zero with the default TTL. Present values are
    /// read through [`Value::as_number`], so non-numeric values count as 0.
    pub fn increment(&self, name: &str, by: f64) -> f64 {
        let now = self.now();
        let mut state = self.shared.state.lock();
        let (result, live_time) = match state.live_entry(name, now) {
            Some(entry) => (entry.value.as_number() + by, entry.live_time),
            None => (by, self.shared.default_ttl),
        };
        state.insert(name, CacheEntry::new(Value::Number(result), live_time, now));
        result
    }

    /// Subtracts `by` from the number under `name` and returns the result.
    pub fn decrement(&self, name: &str, by: f64) -> f64 {
        self.increment(name, -by)
    }

    /// Appends `value` to the list under `name` and returns the new list.
    ///
    /// Absent names start a one-element list; scalars are wrapped first.
    pub fn array_push(&self, name: &str, value: Value) -> Vec<Value> {
        let now = self.now();
        let mut state = self.shared.state.lock();
        let (mut items, live_time) = match state.live_entry(name, now) {
            Some(entry) => (entry.value.clone().into_array(), entry.live_time),
            None => (Vec::new(), self.shared.default_ttl),
        };
        items.push(value);
        state.insert(
            name,
            CacheEntry::new(Value::Array(items.clone()), live_time, now),
        );
        items
    }

    /// Removes the last element equal to `value` from the list under `name`
    /// and returns the new list, or `None` when `name` is absent.
    pub fn array_without(&self, name: &str, value: &Value) -> Option<Vec<Value>> {
        let now = self.now();
        let mut state = self.shared.state.lock();
        let (mut items, live_time) = {
            let entry = state.live_entry(name, now)?;
            (entry.value.clone().into_array(), entry.live_time)
        };
        if let Some(pos) = items.iter().rposition(|item| item == value) {
            items.remove(pos);
        }
        state.insert(
            name,
            CacheEntry::new(Value::Array(items.clone()), live_time, now),
        );
        Some(items)
    }

    /// Current background sweep interval in seconds.
    pub fn clean_interval(&self) -> u64 {
        self.sweeper.lock().interval_secs
    }

    /// Sets the background sweep interval, clamped to
    /// `[MIN_CLEAN_INTERVAL_SECS, MAX_CLEAN_INTERVAL_SECS]`, and restarts a
    /// running sweeper on the new period. Returns the interval in effect.
    pub fn set_clean_interval(&self, secs: u64) -> u64 {
        let secs = clamp_clean_interval(secs);
        let mut slot = self.sweeper.lock();
        if slot.interval_secs == secs {
            return secs;
        }
        slot.interval_secs = secs;
        if let Some(old) = slot.running.take() {
            old.stop();
            match self.spawn_sweeper(Duration::from_secs(secs)) {
                Ok(sweeper) => {
                    slot.running = Some(sweeper);
                    tracing::debug!(interval_secs = secs, "cache sweeper restarted");
                },
                Err(err) => tracing::error!(%err, "failed to restart cache sweeper"),
            }
        }
        secs
    }

    /// Starts the background sweeper if it is not running.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the sweep thread cannot be spawned.
    pub fn start_sweeper(&self) -> io::Result<()> {
        let mut slot = self.sweeper.lock();
        if slot.running.is_none() {
            let interval = Duration::from_secs(slot.interval_secs);
            slot.running = Some(self.spawn_sweeper(interval)?);
        }
        Ok(())
    }

    /// Stops the background sweeper. Returns `true` if one was running.
    pub fn stop_sweeper(&self) -> bool {
        let old = self.sweeper.lock().running.take();
        match old {
            Some(sweeper) => {
                sweeper.stop();
                true
            },
            None => false,
        }
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper.lock().running.is_some()
    }

    pub(crate) fn spawn_sweeper(&self, interval: Duration) -> io::Result<Sweeper> {
        let shared = Arc::clone(&self.shared);
        Sweeper::spawn(interval, move || {
            shared.sweep();
        })
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> TtlMetricsSnapshot {
        let interval = self.clean_interval();
        let state = self.shared.state.lock();
        state.metrics.snapshot(state.entries.len(), interval)
    }
}

#[cfg(feature = "metrics")]
impl<C: Clock> MetricsSnapshotProvider<TtlMetricsSnapshot> for TtlCache<C> {
    fn snapshot(&self) -> TtlMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<C: Clock> MetricsReset for TtlCache<C> {
    fn reset_metrics(&self) {
        self.shared.state.lock().metrics = TtlMetrics::default();
    }
}
