//! Priority-bucketed FIFO index.
//!
//! Keys are grouped into integer priority buckets. Iteration visits buckets
//! in ascending numeric order and, within a bucket, keys in arrival order.
//!
//! ## Architecture
//!
//! ```text
//!   buckets: BTreeMap<i64, Vec<K>>            index: FxHashMap<K, i64>
//!   ┌──────┬──────────────────────┐           ┌─────────┬──────┐
//!   │   1  │ [c]                  │           │  key a  │ 100  │
//!   │  10  │ [b, d]               │           │  key b  │  10  │
//!   │ 100  │ [a]                  │           │  key c  │   1  │
//!   └──────┴──────────────────────┘           │  key d  │  10  │
//!      iteration: c, b, d, a                  └─────────┴──────┘
//! ```
//!
//! ## Behavior
//! - `push(k, p)`: appends to bucket `p`, creating it if needed
//! - `remove(keys, priorities)`: removes from the selected buckets only,
//!   stopping once every requested key is found; empty buckets are dropped
//! - `iter()`: ascending bucket order, FIFO within each bucket
//!
//! ## Performance
//! - `push` / `priority_of`: O(log B) / O(1) average
//! - `remove`: O(selected bucket sizes)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

/// Ordered priority buckets of keys.
#[derive(Debug)]
pub struct PriorityBuckets<K> {
    buckets: BTreeMap<i64, Vec<K>>,
    index: FxHashMap<K, i64>,
}

impl<K> Default for PriorityBuckets<K> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<K> PriorityBuckets<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key` to the bucket for `priority`.
    ///
    /// A key already present is left where it is; returns `false` in that case.
    pub fn push(&mut self, key: K, priority: i64) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.buckets.entry(priority).or_default().push(key.clone());
        self.index.insert(key, priority);
        true
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn contains_priority(&self, priority: i64) -> bool {
        self.buckets.contains_key(&priority)
    }

    pub fn priority_of(&self, key: &K) -> Option<i64> {
        self.index.get(key).copied()
    }

    /// Keys of one bucket in arrival order.
    pub fn bucket(&self, priority: i64) -> Option<&[K]> {
        self.buckets.get(&priority).map(Vec::as_slice)
    }

    /// Bucket numbers in ascending order.
    pub fn priorities(&self) -> impl Iterator<Item = i64> + '_ {
        self.buckets.keys().copied()
    }

    /// Removes `keys` from the buckets named in `priorities` (all buckets when
    /// `None`). Returns the keys actually removed, in bucket visiting order.
    pub fn remove(&mut self, keys: &[K], priorities: Option<&[i64]>) -> Vec<K> {
        let mut pending: FxHashSet<&K> = keys.iter().collect();
        let mut removed = Vec::new();
        if pending.is_empty() {
            return removed;
        }

        let selected: Vec<i64> = match priorities {
            Some(list) => list.to_vec(),
            None => self.buckets.keys().copied().collect(),
        };

        for priority in selected {
            if pending.is_empty() {
                break;
            }
            let Some(bucket) = self.buckets.get_mut(&priority) else {
                continue;
            };
            bucket.retain(|key| {
                if pending.remove(key) {
                    removed.push(key.clone());
                    false
                } else {
                    true
                }
            });
            if bucket.is_empty() {
                self.buckets.remove(&priority);
            }
        }

        for key in &removed {
            self.index.remove(key);
        }
        removed
    }

    /// Iterates keys in priority order, FIFO within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.buckets.values().flat_map(|bucket| bucket.iter())
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of keys across all buckets.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let total: usize = self.buckets.values().map(Vec::len).sum();
        assert_eq!(total, self.index.len());
        for (&priority, bucket) in &self.buckets {
            assert!(!bucket.is_empty());
            for key in bucket {
                assert_eq!(self.index.get(key), Some(&priority));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_is_ascending_then_fifo() {
        let mut buckets = PriorityBuckets::new();
        buckets.push("b", 10);
        buckets.push("a", 100);
        buckets.push("c", 1);
        buckets.push("d", 10);

        let order: Vec<_> = buckets.iter().copied().collect();
        assert_eq!(order, vec!["c", "b", "d", "a"]);
        assert_eq!(buckets.priorities().collect::<Vec<_>>(), vec![1, 10, 100]);
        buckets.debug_validate_invariants();
    }

    #[test]
    fn negative_priorities_sort_first() {
        let mut buckets = PriorityBuckets::new();
        buckets.push("zero", 0);
        buckets.push("neg", -5);
        assert_eq!(buckets.iter().next(), Some(&"neg"));
    }

    #[test]
    fn push_existing_key_is_rejected() {
        let mut buckets = PriorityBuckets::new();
        assert!(buckets.push("a", 1));
        assert!(!buckets.push("a", 2));
        assert_eq!(buckets.priority_of(&"a"), Some(1));
        assert!(!buckets.contains_priority(2));
    }

    #[test]
    fn remove_respects_selected_buckets() {
        let mut buckets = PriorityBuckets::new();
        buckets.push("k", 100);

        assert!(buckets.remove(&["k"], Some(&[200][..])).is_empty());
        assert!(buckets.contains(&"k"));

        assert_eq!(buckets.remove(&["k"], Some(&[200, 100][..])), vec!["k"]);
        assert!(!buckets.contains(&"k"));
        assert!(!buckets.contains_priority(100));
        buckets.debug_validate_invariants();
    }

    #[test]
    fn remove_reports_only_found_keys() {
        let mut buckets = PriorityBuckets::new();
        buckets.push("a", 1);
        buckets.push("b", 1);
        buckets.push("c", 2);

        let removed = buckets.remove(&["c", "missing", "a"], None);
        assert_eq!(removed, vec!["a", "c"]);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.bucket(1), Some(&["b"][..]));
        assert_eq!(buckets.bucket_count(), 1);
        buckets.debug_validate_invariants();
    }

    #[test]
    fn clear_resets_state() {
        let mut buckets = PriorityBuckets::new();
        buckets.push("a", 1);
        buckets.clear();
        assert!(buckets.is_empty());
        assert_eq!(buckets.bucket_count(), 0);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: iteration order equals a stable sort of arrivals by priority
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_iteration_is_stable_sort(
            priorities in prop::collection::vec(-20i64..20, 0..60)
        ) {
            let mut buckets = PriorityBuckets::new();
            for (i, &p) in priorities.iter().enumerate() {
                buckets.push(i, p);
            }

            let mut expected: Vec<(i64, usize)> =
                priorities.iter().copied().enumerate().map(|(i, p)| (p, i)).collect();
            expected.sort_by_key(|&(p, _)| p);
            let expected: Vec<usize> = expected.into_iter().map(|(_, i)| i).collect();

            let actual: Vec<usize> = buckets.iter().copied().collect();
            prop_assert_eq!(actual, expected);
            buckets.debug_validate_invariants();
        }

        /// Property: removed keys are gone and the rest keep their order
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_remove_keeps_relative_order(
            priorities in prop::collection::vec(0i64..5, 1..40),
            drop_mask in prop::collection::vec(any::<bool>(), 40)
        ) {
            let mut buckets = PriorityBuckets::new();
            for (i, &p) in priorities.iter().enumerate() {
                buckets.push(i, p);
            }
            let before: Vec<usize> = buckets.iter().copied().collect();
            let to_drop: Vec<usize> =
                (0..priorities.len()).filter(|&i| drop_mask[i]).collect();

            let mut removed = buckets.remove(&to_drop, None);
            removed.sort_unstable();
            prop_assert_eq!(&removed, &to_drop);

            let after: Vec<usize> = buckets.iter().copied().collect();
            let expected: Vec<usize> =
                before.into_iter().filter(|i| !to_drop.contains(i)).collect();
            prop_assert_eq!(after, expected);
            buckets.debug_validate_invariants();
        }
    }
}
