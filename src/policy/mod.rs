//! Expiry policy and its background machinery.
//!
//! - [`ttl`]: [`TtlCache`](ttl::TtlCache), name → value storage with
//!   time-to-live expiry.
//! - [`sweeper`]: [`Sweeper`](sweeper::Sweeper), the periodic thread that
//!   deletes expired entries.

pub mod sweeper;
pub mod ttl;
