//! Keyed content stores.
//!
//! - [`content`]: [`ContentManager`], storage partitioned by content type.
//! - [`priority`]: [`Priority`], priority-ordered view over a content store.

pub mod content;
pub mod priority;

pub use content::{ContentManager, ContentPosition, ContentStatus, Entry};
pub use priority::{DEFAULT_PRIORITY, Priority, PriorityStatus};
