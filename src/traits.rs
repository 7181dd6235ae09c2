//! # Store Trait Seams
//!
//! The stores in this crate are generic over two small seams:
//!
//! ```text
//!   ┌───────────────────────────────┐      ┌───────────────────────────────┐
//!   │          Classify             │      │            Clock              │
//!   │                               │      │                               │
//!   │  content_type(&) → ContentType│      │  now_secs(&) → u64            │
//!   └───────────────┬───────────────┘      └───────────────┬───────────────┘
//!                   │                                      │
//!                   ▼                                      ▼
//!   ┌───────────────────────────────┐      ┌───────────────────────────────┐
//!   │  ContentManager<V> / Priority │      │        TtlCache<C>            │
//!   │  partition by content type    │      │  expiry against the clock     │
//!   └───────────────────────────────┘      └───────────────────────────────┘
//! ```
//!
//! | Trait      | Used by                       | Purpose                            |
//! |------------|-------------------------------|------------------------------------|
//! | `Classify` | `ContentManager`, `Priority`  | Derive the partition of a value    |
//! | `Clock`    | `TtlCache`                    | Epoch-seconds time source          |
//!
//! ## Thread Safety
//!
//! `Clock` implementations must be `Send + Sync` because the TTL cache sweeper
//! reads the clock from its own thread.

use crate::value::ContentType;

/// Maps a value to the partition tag it is stored under when no explicit
/// partition is given.
pub trait Classify {
    fn content_type(&self) -> ContentType;
}

/// Source of "current epoch seconds" for expiry decisions.
pub trait Clock: Send + Sync + 'static {
    /// Whole seconds since the UNIX epoch.
    fn now_secs(&self) -> u64;
}
