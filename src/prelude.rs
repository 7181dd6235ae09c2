pub use crate::builder::CacheBuilder;
pub use crate::ds::{ContentKey, InvalidKey, KeySequencer, PriorityBuckets};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::TtlMetricsSnapshot;
pub use crate::policy::sweeper::Sweeper;
pub use crate::policy::ttl::{CacheEntry, Expiry, Ttl, TtlCache};
pub use crate::store::{
    ContentManager, ContentPosition, ContentStatus, DEFAULT_PRIORITY, Entry, Priority,
    PriorityStatus,
};
pub use crate::time::{ManualClock, SystemClock};
pub use crate::traits::{Classify, Clock};
pub use crate::value::{Callback, ContentType, Value};
