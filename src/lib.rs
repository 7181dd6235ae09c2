//! contentkit: typed content stores and a time-to-live cache.
//!
//! - [`store::ContentManager`]: keyed storage partitioned by content type,
//!   with pinning, metadata and cleanup.
//! - [`store::Priority`]: priority-ordered list built on a content store.
//! - [`policy::ttl::TtlCache`]: name → value cache with expiry and an
//!   optional background sweeper.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod store;
pub mod time;
pub mod value;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
