//! Builder for [`TtlCache`] instances.
//!
//! Collects the default TTL, the sweep interval and whether the background
//! sweeper should start, then validates them in one place. Built caches
//! sweep in the background unless `sweep(false)` opts out; bare
//! [`TtlCache::new`] does not.
//!
//! ## Example
//!
//! ```rust
//! use contentkit::builder::CacheBuilder;
//! use contentkit::policy::ttl::Ttl;
//! use contentkit::value::Value;
//!
//! let cache = CacheBuilder::new()
//!     .default_ttl(Ttl::SHORT)
//!     .clean_interval(60)
//!     .build();
//! cache.set_default("greeting", Value::from("hello"));
//! assert_eq!(cache.get("greeting"), Some(Value::from("hello")));
//! ```

use crate::error::ConfigError;
use crate::policy::ttl::{
    DEFAULT_CLEAN_INTERVAL_SECS, MAX_CLEAN_INTERVAL_SECS, MIN_CLEAN_INTERVAL_SECS, Ttl, TtlCache,
    clamp_clean_interval,
};
use crate::time::SystemClock;
use crate::traits::Clock;

/// Builder for creating [`TtlCache`] instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    default_ttl: Ttl,
    clean_interval_secs: u64,
    sweep: bool,
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self {
            default_ttl: Ttl::default(),
            clean_interval_secs: DEFAULT_CLEAN_INTERVAL_SECS,
            sweep: true,
        }
    }
}

impl CacheBuilder {
    /// Defaults: `Ttl::MEDIUM`, a 600 second sweep interval, sweeper on.
    pub fn new() -> Self {
        Self::default()
    }

    /// TTL given to entries stored without an explicit one.
    pub fn default_ttl(mut self, ttl: Ttl) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Background sweep interval in seconds.
    ///
    /// [`build`](Self::build) clamps out-of-range values;
    /// [`try_build`](Self::try_build) rejects them.
    pub fn clean_interval(mut self, secs: u64) -> Self {
        self.clean_interval_secs = secs;
        self
    }

    /// Start the background sweeper as part of building (default `true`).
    pub fn sweep(mut self, enabled: bool) -> Self {
        self.sweep = enabled;
        self
    }

    /// Builds a cache on the system clock.
    ///
    /// # Panics
    ///
    /// Panics if the sweep thread cannot be spawned. Use
    /// [`try_build`](Self::try_build) to handle that instead.
    pub fn build(self) -> TtlCache<SystemClock> {
        self.build_with_clock(SystemClock)
    }

    /// Builds a cache on `clock`, clamping the sweep interval.
    ///
    /// # Panics
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_clock<C: Clock>(self, clock: C) -> TtlCache<C> {
        let clamped = Self {
            clean_interval_secs: clamp_clean_interval(self.clean_interval_secs),
            ..self
        };
        match clamped.try_build_with_clock(clock) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible variant of [`build`](Self::build).
    pub fn try_build(self) -> Result<TtlCache<SystemClock>, ConfigError> {
        self.try_build_with_clock(SystemClock)
    }

    /// Builds a cache on `clock`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the default TTL is zero seconds, the sweep
    /// interval is outside `[10, 3600]`, or the sweep thread cannot be
    /// spawned.
    pub fn try_build_with_clock<C: Clock>(self, clock: C) -> Result<TtlCache<C>, ConfigError> {
        if self.default_ttl == Ttl::Seconds(0) {
            return Err(ConfigError::new("default_ttl must be > 0 seconds"));
        }
        if !(MIN_CLEAN_INTERVAL_SECS..=MAX_CLEAN_INTERVAL_SECS).contains(&self.clean_interval_secs)
        {
            return Err(ConfigError::new(format!(
                "clean_interval must be in [{}, {}] seconds, got {}",
                MIN_CLEAN_INTERVAL_SECS, MAX_CLEAN_INTERVAL_SECS, self.clean_interval_secs
            )));
        }

        let cache = TtlCache::from_parts(clock, self.default_ttl, self.clean_interval_secs);
        if self.sweep {
            cache.start_sweeper().map_err(|err| {
                ConfigError::new(format!("failed to spawn sweeper thread: {}", err))
            })?;
        }
        tracing::debug!(
            default_ttl = ?self.default_ttl,
            clean_interval_secs = self.clean_interval_secs,
            sweep = self.sweep,
            "built ttl cache"
        );
        Ok(cache)
    }
}
