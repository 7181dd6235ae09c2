pub mod key;
pub mod priority_buckets;
pub mod sequencer;

pub use key::{ContentKey, InvalidKey, has_key_shape};
pub use priority_buckets::PriorityBuckets;
pub use sequencer::KeySequencer;
