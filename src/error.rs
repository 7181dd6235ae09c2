//! Errors raised outside the soft-fail store paths.
//!
//! Store lookups and mutations never fail: unknown keys answer `false`,
//! `None` or an empty list. Errors only surface in two places:
//!
//! | Type               | Raised by                                            |
//! |--------------------|------------------------------------------------------|
//! | [`ConfigError`]    | `ContentManager::try_with_prefix` (empty or `_` prefix), `CacheBuilder::try_build*` (zero TTL, interval outside `[10, 3600]`, sweeper spawn failure) |
//! | [`InvariantError`] | `check_invariants` on `ContentManager` and `Priority` |
//!
//! ## Example Usage
//!
//! ```
//! use contentkit::builder::CacheBuilder;
//! use contentkit::error::ConfigError;
//! use contentkit::policy::ttl::TtlCache;
//!
//! let cache: Result<TtlCache, ConfigError> =
//!     CacheBuilder::new().sweep(false).clean_interval(60).try_build();
//! assert!(cache.is_ok());
//!
//! let bad = CacheBuilder::new().clean_interval(1).try_build();
//! assert!(bad.is_err());
//! ```

use std::fmt;

/// A store's internal bookkeeping disagrees with itself, e.g. a key filed
/// under the wrong partition or a bucketed key missing from storage.
///
/// Returned by [`ContentManager::check_invariants`](crate::store::ContentManager::check_invariants)
/// and [`Priority::check_invariants`](crate::store::Priority::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Which invariant failed.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

/// A store or cache was configured with values it cannot run with.
///
/// ```
/// use contentkit::store::ContentManager;
///
/// let err = ContentManager::<contentkit::value::Value>::try_with_prefix("").unwrap_err();
/// assert!(err.to_string().contains("prefix"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Which parameter was rejected, and why.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}
