//! Priority-ordered content list.
//!
//! [`Priority`] pairs a [`ContentManager`] (fixed to the `"priority"`
//! partition) with a [`PriorityBuckets`] index. Storage answers "what is this
//! key"; the index answers "in what order". Removal by key and removal by
//! content therefore stay independent of ordering.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐        ┌──────────────────────────────┐
//!   │ PriorityBuckets<ContentKey>  │        │ ContentManager<V>            │
//!   │                              │        │   partition "priority"       │
//!   │   1   → [k3]                 │  key   │   k1 → {content, meta}       │
//!   │   10  → [k1, k4]             │ ─────► │   k2 → {content, meta}       │
//!   │   100 → [k2]                 │        │   ...   (all pinned)         │
//!   └──────────────────────────────┘        └──────────────────────────────┘
//! ```
//!
//! ## Ordering Contract
//!
//! [`get_contents`](Priority::get_contents) yields entries by ascending
//! priority number, then by arrival within a priority. The order is stable
//! for identical sequences of calls.
//!
//! ## Example Usage
//!
//! ```
//! use contentkit::store::priority::Priority;
//! use contentkit::value::Value;
//!
//! let mut list: Priority = Priority::new();
//! list.add_content(Value::from("B"), 10, None);
//! list.add_content(Value::from("A"), 100, None);
//! list.add_content(Value::from("C"), 1, None);
//!
//! let order = list.get_content_values();
//! assert_eq!(order, vec![Value::from("C"), Value::from("B"), Value::from("A")]);
//! ```

use crate::ds::{ContentKey, PriorityBuckets};
use crate::error::InvariantError;
use crate::store::content::{ContentManager, Entry};
use crate::traits::Classify;
use crate::value::Value;

/// Partition every entry of a [`Priority`] is stored under.
pub const PRIORITY_PARTITION: &str = "priority";

/// Priority used by [`Priority::push`].
pub const DEFAULT_PRIORITY: i64 = 10;

/// Snapshot returned by [`Priority::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriorityStatus {
    /// Number of non-empty priority buckets.
    pub priorities: usize,
    /// Number of stored entries.
    pub contents: usize,
}

/// Contents ordered by integer priority, lowest first, FIFO within a priority.
#[derive(Debug)]
pub struct Priority<V = Value> {
    store: ContentManager<V>,
    buckets: PriorityBuckets<ContentKey>,
}

impl<V> Default for Priority<V> {
    fn default() -> Self {
        Self {
            store: ContentManager::default(),
            buckets: PriorityBuckets::new(),
        }
    }
}

impl<V> Priority<V>
where
    V: Classify + PartialEq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `content` at `priority` and returns its new key.
    ///
    /// Equal contents are not merged: every call creates a new entry.
    pub fn add_content(&mut self, content: V, priority: i64, meta: Option<V>) -> ContentKey {
        let key = self.store.add(content, meta, Some(PRIORITY_PARTITION));
        self.store.using(&key, true);
        self.buckets.push(key.clone(), priority);
        key
    }

    /// Stores `content` at [`DEFAULT_PRIORITY`].
    pub fn push(&mut self, content: V) -> ContentKey {
        self.add_content(content, DEFAULT_PRIORITY, None)
    }

    pub fn has_priority(&self, priority: i64) -> bool {
        self.buckets.contains_priority(priority)
    }

    pub fn has_content(&self, content: &V) -> bool {
        self.store.has_content(content, Some(PRIORITY_PARTITION))
    }

    pub fn has_key(&self, key: &ContentKey) -> bool {
        self.buckets.contains(key)
    }

    pub fn priority_of(&self, key: &ContentKey) -> Option<i64> {
        self.buckets.priority_of(key)
    }

    /// Owned copy of one entry.
    pub fn get(&self, key: &ContentKey) -> Option<Entry<V>> {
        self.store.get(key)
    }

    /// Removes `keys` from the buckets listed in `priorities` (every bucket
    /// when `None`). Returns the keys that were found and removed.
    pub fn remove(&mut self, keys: &[ContentKey], priorities: Option<&[i64]>) -> Vec<ContentKey> {
        let removed = self.buckets.remove(keys, priorities);
        self.store.remove(&removed);
        removed
    }

    /// Removes every entry equal to `content` from the selected buckets.
    pub fn remove_content(&mut self, content: &V, priorities: Option<&[i64]>) -> Vec<ContentKey> {
        let keys: Vec<ContentKey> = self
            .store
            .content_positions(content, Some(PRIORITY_PARTITION))
            .into_iter()
            .map(|pos| pos.key)
            .collect();
        self.remove(&keys, priorities)
    }

    /// Keys in priority order.
    pub fn keys(&self) -> Vec<ContentKey> {
        self.buckets.iter().cloned().collect()
    }

    /// Entries in priority order.
    pub fn get_contents(&self) -> Vec<Entry<V>> {
        self.buckets
            .iter()
            .filter_map(|key| self.store.get(key))
            .collect()
    }

    /// Bare contents in priority order.
    pub fn get_content_values(&self) -> Vec<V> {
        self.buckets
            .iter()
            .filter_map(|key| self.store.peek(key))
            .map(|entry| entry.content.clone())
            .collect()
    }

    pub fn status(&self) -> PriorityStatus {
        PriorityStatus {
            priorities: self.buckets.bucket_count(),
            contents: self.buckets.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.store.clean();
    }

    /// Checks that the bucket index and the backing store describe the same
    /// set of keys.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.store.check_invariants()?;

        let stored = self.store.partition_len(PRIORITY_PARTITION);
        if stored != self.store.len() {
            return Err(InvariantError::new(format!(
                "store holds {} entries outside the {:?} partition",
                self.store.len() - stored,
                PRIORITY_PARTITION
            )));
        }
        if stored != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "store holds {} entries but buckets index {}",
                stored,
                self.buckets.len()
            )));
        }
        for key in self.buckets.iter() {
            if self.store.peek(key).is_none() {
                return Err(InvariantError::new(format!(
                    "bucketed key {} missing from store",
                    key
                )));
            }
            if !self.store.is_using(key) {
                return Err(InvariantError::new(format!("key {} is not pinned", key)));
            }
        }
        Ok(())
    }
}
