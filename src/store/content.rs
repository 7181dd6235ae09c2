//! Typed content store with auto-derived partitions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ContentManager<V> Layout                         │
//! │                                                                         │
//! │   partitions: BTreeMap<partition, BTreeMap<ContentKey, Entry<V>>>       │
//! │                                                                         │
//! │   ┌──────────┬─────────────────────────────────────────────┐            │
//! │   │ "string" │ cm_string_1 → {content, meta}               │            │
//! │   │          │ cm_string_2 → {content, meta}               │            │
//! │   │ "number" │ cm_number_1 → {content, meta}               │            │
//! │   └──────────┴─────────────────────────────────────────────┘            │
//! │                                                                         │
//! │   using: FxHashSet<ContentKey>     (pinned keys, independent of         │
//! │                                     partition storage)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`ContentManager`]: the store
//! - [`Entry`]: `{content, meta}` pair; reads hand out owned copies
//! - [`ContentPosition`]: `{partition, key}` identifying a stored entry
//! - [`ContentStatus`]: summary of pinned count and keys per partition
//!
//! ## Core Operations
//!
//! | Operation            | Notes                                                |
//! |----------------------|------------------------------------------------------|
//! | `add`                | Partition from argument or classifier, fresh key     |
//! | `add_unique`         | Returns an equal entry's key when one exists         |
//! | `get` / `get_type`   | Owned copies; `None` when absent                     |
//! | `update*`            | `false` when the key is absent                       |
//! | `using` / `unused`   | Pin or unpin a key                                   |
//! | `remove*`            | Reports only what was actually removed               |
//!
//! ## Failure Policy
//!
//! Lookups and mutations never panic or return errors for unknown or
//! malformed keys: they answer `false`, `None` or an empty list.
//!
//! ## Example Usage
//!
//! ```
//! use contentkit::store::content::ContentManager;
//! use contentkit::value::Value;
//!
//! let mut store: ContentManager = ContentManager::new();
//! let key = store.add(Value::from("hello"), None, None);
//! assert_eq!(key.partition(), "string");
//! assert_eq!(store.get_content(&key, Value::Null), Value::from("hello"));
//!
//! let again = store.add_unique(Value::from("hello"), None, None);
//! assert_eq!(again, key);
//!
//! store.using(&key, true);
//! assert!(store.is_using_content(&Value::from("hello"), None));
//! assert_eq!(store.remove_using().len(), 1);
//! assert!(!store.has_key(&key, None));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::ds::{ContentKey, KeySequencer, has_key_shape};
use crate::error::{ConfigError, InvariantError};
use crate::traits::Classify;
use crate::value::Value;

/// Key prefix used by [`ContentManager::new`].
pub const DEFAULT_PREFIX: &str = "cm";

/// Stored content and its optional metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<V = Value> {
    pub content: V,
    pub meta: Option<V>,
}

/// Location of a stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentPosition {
    pub partition: String,
    pub key: ContentKey,
}

impl ContentPosition {
    fn of(key: &ContentKey) -> Self {
        Self {
            partition: key.partition().to_owned(),
            key: key.clone(),
        }
    }
}

/// Snapshot returned by [`ContentManager::status`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentStatus {
    /// Number of pinned keys.
    pub using: usize,
    /// Stored keys per partition, in creation order.
    pub types: BTreeMap<String, Vec<ContentKey>>,
}

type Partition<V> = BTreeMap<ContentKey, Entry<V>>;

/// Keyed store partitioned by content type, with a pinned ("using") set.
#[derive(Debug)]
pub struct ContentManager<V = Value> {
    prefix: Arc<str>,
    partitions: BTreeMap<Arc<str>, Partition<V>>,
    using: FxHashSet<ContentKey>,
    sequencer: KeySequencer,
}

impl<V> Default for ContentManager<V> {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.into(),
            partitions: BTreeMap::new(),
            using: FxHashSet::default(),
            sequencer: KeySequencer::new(),
        }
    }
}

/// Returns `true` if `name` can be embedded in a key and parsed back out.
pub fn is_valid_partition(name: &str) -> bool {
    !name.is_empty() && !name.contains('_')
}

impl<V> ContentManager<V>
where
    V: Classify + PartialEq + Clone,
{
    /// Creates an empty store using [`DEFAULT_PREFIX`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose keys start with `prefix`.
    ///
    /// # Panics
    ///
    /// Panics if `prefix` is empty or contains `_`. Use
    /// [`try_with_prefix`](Self::try_with_prefix) for a fallible version.
    pub fn with_prefix(prefix: &str) -> Self {
        match Self::try_with_prefix(prefix) {
            Ok(store) => store,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an empty store whose keys start with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `prefix` is empty or contains `_`.
    ///
    /// ```
    /// use contentkit::store::content::ContentManager;
    ///
    /// assert!(ContentManager::<contentkit::value::Value>::try_with_prefix("ui").is_ok());
    /// assert!(ContentManager::<contentkit::value::Value>::try_with_prefix("my_ui").is_err());
    /// ```
    pub fn try_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        if !is_valid_partition(prefix) {
            return Err(ConfigError::new(format!(
                "key prefix must be non-empty and contain no '_', got {:?}",
                prefix
            )));
        }
        Ok(Self {
            prefix: prefix.into(),
            ..Self::default()
        })
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolves the partition for `content`: the explicit name when valid,
    /// otherwise the classifier's tag.
    fn resolve_partition(&self, content: &V, partition: Option<&str>) -> Arc<str> {
        match partition {
            Some(name) if is_valid_partition(name) => match self.partitions.get_key_value(name) {
                Some((existing, _)) => Arc::clone(existing),
                None => name.into(),
            },
            Some(name) => {
                let tag = content.content_type();
                tracing::warn!(
                    partition = name,
                    fallback = tag.as_str(),
                    "invalid partition name, using content type"
                );
                tag.as_str().into()
            },
            None => content.content_type().as_str().into(),
        }
    }

    /// Partition name to search for `content`: explicit or classified.
    fn search_partition<'a>(&self, content: &V, partition: Option<&'a str>) -> &'a str {
        match partition {
            Some(name) => name,
            None => content.content_type().as_str(),
        }
    }

    /// Stores `content` under a fresh key. The key is not pinned.
    pub fn add(&mut self, content: V, meta: Option<V>, partition: Option<&str>) -> ContentKey {
        let partition = self.resolve_partition(&content, partition);
        let sequence = self.sequencer.next(&partition);
        let key = ContentKey::new(Arc::clone(&self.prefix), Arc::clone(&partition), sequence);
        self.partitions
            .entry(partition)
            .or_default()
            .insert(key.clone(), Entry { content, meta });
        key
    }

    /// Returns the key of an entry equal to `content` in the target
    /// partition, or stores it like [`add`](Self::add).
    pub fn add_unique(
        &mut self,
        content: V,
        meta: Option<V>,
        partition: Option<&str>,
    ) -> ContentKey {
        let target = self.resolve_partition(&content, partition);
        if let Some(key) = self.find_in(&target, |entry| entry.content == content) {
            return key;
        }
        self.add(content, meta, Some(&*target))
    }

    fn find_in<F>(&self, partition: &str, mut pred: F) -> Option<ContentKey>
    where
        F: FnMut(&Entry<V>) -> bool,
    {
        self.partitions
            .get(partition)?
            .iter()
            .find(|(_, entry)| pred(entry))
            .map(|(key, _)| key.clone())
    }

    pub fn has_type(&self, partition: &str) -> bool {
        self.partitions.contains_key(partition)
    }

    /// Names of the non-empty partitions, sorted.
    pub fn types(&self) -> Vec<String> {
        self.partitions.keys().map(|name| name.to_string()).collect()
    }

    /// Every position whose content equals `content`, within `partition` or
    /// the classified partition.
    pub fn content_positions(&self, content: &V, partition: Option<&str>) -> Vec<ContentPosition> {
        let partition = self.search_partition(content, partition);
        self.partitions
            .get(partition)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, entry)| entry.content == *content)
                    .map(|(key, _)| ContentPosition::of(key))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every position whose meta equals `meta`, within `partition` or across
    /// all partitions.
    pub fn meta_positions(&self, meta: &V, partition: Option<&str>) -> Vec<ContentPosition> {
        let matches = |entries: &Partition<V>| -> Vec<ContentPosition> {
            entries
                .iter()
                .filter(|(_, entry)| entry.meta.as_ref() == Some(meta))
                .map(|(key, _)| ContentPosition::of(key))
                .collect()
        };
        match partition {
            Some(name) => self.partitions.get(name).map(matches).unwrap_or_default(),
            None => self.partitions.values().flat_map(matches).collect(),
        }
    }

    pub fn has_content(&self, content: &V, partition: Option<&str>) -> bool {
        let partition = self.search_partition(content, partition);
        self.partitions
            .get(partition)
            .is_some_and(|entries| entries.values().any(|entry| entry.content == *content))
    }

    /// Returns `true` if `raw` has at least three `_`-separated segments and
    /// a non-empty partition segment. Use [`ContentKey::parse`] to get a key
    /// this store can look up.
    pub fn is_valid_key(raw: &str) -> bool {
        has_key_shape(raw)
    }

    /// Returns `true` if `key` is pinned or stored in `partition` (defaults
    /// to the partition embedded in the key).
    pub fn has_key(&self, key: &ContentKey, partition: Option<&str>) -> bool {
        if self.using.contains(key) {
            return true;
        }
        let partition = partition.unwrap_or(key.partition());
        self.partitions
            .get(partition)
            .is_some_and(|entries| entries.contains_key(key))
    }

    /// Borrowing lookup.
    pub fn peek(&self, key: &ContentKey) -> Option<&Entry<V>> {
        self.partitions.get(key.partition())?.get(key)
    }

    fn entry_mut(&mut self, key: &ContentKey) -> Option<&mut Entry<V>> {
        self.partitions.get_mut(key.partition())?.get_mut(key)
    }

    /// Owned copy of the entry; later changes to the copy do not reach the store.
    pub fn get(&self, key: &ContentKey) -> Option<Entry<V>> {
        self.peek(key).cloned()
    }

    /// Owned copy of a whole partition.
    pub fn get_type(&self, partition: &str) -> Option<BTreeMap<ContentKey, Entry<V>>> {
        self.partitions.get(partition).cloned()
    }

    pub fn get_content(&self, key: &ContentKey, default: V) -> V {
        self.peek(key).map_or(default, |entry| entry.content.clone())
    }

    /// Stored meta, or `default` when the key is absent or has no meta.
    pub fn get_meta(&self, key: &ContentKey, default: V) -> V {
        self.peek(key)
            .and_then(|entry| entry.meta.clone())
            .unwrap_or(default)
    }

    /// Replaces the content of `key`, leaving its meta untouched.
    pub fn update(&mut self, key: &ContentKey, content: V) -> bool {
        match self.entry_mut(key) {
            Some(entry) => {
                entry.content = content;
                true
            },
            None => false,
        }
    }

    /// Replaces both content and meta of `key`; `None` clears the meta.
    pub fn update_with_meta(&mut self, key: &ContentKey, content: V, meta: Option<V>) -> bool {
        match self.entry_mut(key) {
            Some(entry) => {
                entry.content = content;
                entry.meta = meta;
                true
            },
            None => false,
        }
    }

    pub fn update_meta(&mut self, key: &ContentKey, meta: Option<V>) -> bool {
        match self.entry_mut(key) {
            Some(entry) => {
                entry.meta = meta;
                true
            },
            None => false,
        }
    }

    /// Pins (`true`) or unpins (`false`) `key`.
    pub fn using(&mut self, key: &ContentKey, is_using: bool) {
        if is_using {
            self.using.insert(key.clone());
        } else {
            self.using.remove(key);
        }
    }

    /// Unpins `key` without touching its storage.
    pub fn unused(&mut self, key: &ContentKey) {
        self.using.remove(key);
    }

    pub fn is_using(&self, key: &ContentKey) -> bool {
        self.using.contains(key)
    }

    pub fn is_using_content(&self, content: &V, partition: Option<&str>) -> bool {
        self.content_positions(content, partition)
            .iter()
            .any(|pos| self.using.contains(&pos.key))
    }

    /// Removes `keys` from storage and from the pinned set.
    ///
    /// Unknown keys are skipped and not reported.
    pub fn remove(&mut self, keys: &[ContentKey]) -> Vec<ContentPosition> {
        let mut removed = Vec::new();
        for key in keys {
            self.using.remove(key);
            let Some(entries) = self.partitions.get_mut(key.partition()) else {
                continue;
            };
            if entries.remove(key).is_some() {
                removed.push(ContentPosition::of(key));
            }
            if entries.is_empty() {
                self.partitions.remove(key.partition());
            }
        }
        removed
    }

    pub fn remove_content(&mut self, content: &V, partition: Option<&str>) -> Vec<ContentPosition> {
        let keys: Vec<ContentKey> = self
            .content_positions(content, partition)
            .into_iter()
            .map(|pos| pos.key)
            .collect();
        self.remove(&keys)
    }

    /// Removes every pinned key.
    pub fn remove_using(&mut self) -> Vec<ContentPosition> {
        let mut keys: Vec<ContentKey> = self.using.iter().cloned().collect();
        keys.sort_unstable();
        self.remove(&keys)
    }

    /// Removes every stored key that is not pinned.
    pub fn remove_unusing(&mut self) -> Vec<ContentPosition> {
        let keys: Vec<ContentKey> = self
            .partitions
            .values()
            .flat_map(|entries| entries.keys())
            .filter(|key| !self.using.contains(*key))
            .cloned()
            .collect();
        self.remove(&keys)
    }

    pub fn status(&self) -> ContentStatus {
        ContentStatus {
            using: self.using.len(),
            types: self
                .partitions
                .iter()
                .map(|(name, entries)| (name.to_string(), entries.keys().cloned().collect()))
                .collect(),
        }
    }

    /// Drops every entry and every pin. Key sequences keep counting.
    pub fn clean(&mut self) {
        self.partitions.clear();
        self.using.clear();
    }

    /// Total number of stored entries.
    pub fn len(&self) -> usize {
        self.partitions.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn partition_len(&self, partition: &str) -> usize {
        self.partitions.get(partition).map_or(0, BTreeMap::len)
    }

    /// Stored keys in partition then creation order.
    pub fn keys(&self) -> impl Iterator<Item = &ContentKey> + '_ {
        self.partitions.values().flat_map(|entries| entries.keys())
    }

    /// Validates partition and key invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (name, entries) in &self.partitions {
            if entries.is_empty() {
                return Err(InvariantError::new(format!(
                    "partition {:?} is empty but still present",
                    name
                )));
            }
            for key in entries.keys() {
                if key.partition() != &**name {
                    return Err(InvariantError::new(format!(
                        "key {} stored in partition {:?}",
                        key, name
                    )));
                }
                if key.prefix() != &*self.prefix {
                    return Err(InvariantError::new(format!(
                        "key {} does not carry prefix {:?}",
                        key, self.prefix
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ContentType;

    fn store() -> ContentManager {
        ContentManager::new()
    }

    #[test]
    fn add_then_get_returns_content_without_meta() {
        let mut cm = store();
        let key = cm.add(Value::from(7), None, None);
        assert_eq!(key.partition(), "number");
        assert_eq!(key.prefix(), DEFAULT_PREFIX);
        assert_eq!(
            cm.get(&key),
            Some(Entry {
                content: Value::from(7),
                meta: None
            })
        );
        assert!(!cm.is_using(&key));
    }

    #[test]
    fn add_uses_explicit_partition() {
        let mut cm = store();
        let key = cm.add(Value::from("x"), Some(Value::from(1)), Some("widgets"));
        assert_eq!(key.partition(), "widgets");
        assert!(cm.has_type("widgets"));
        assert!(!cm.has_type("string"));
        assert_eq!(cm.get_meta(&key, Value::Null), Value::from(1));
    }

    #[test]
    fn explicit_partition_keys_round_trip_through_strings() {
        let mut cm = store();
        let added = cm.add(Value::from("gear"), None, Some("widgets"));
        let unique = cm.add_unique(Value::from("bolt"), None, Some("widgets"));
        assert_eq!(cm.add_unique(Value::from("bolt"), None, Some("widgets")), unique);

        for key in [&added, &unique] {
            let text = key.to_string();
            assert!(text.starts_with("cm_widgets_"));
            assert!(ContentManager::<Value>::is_valid_key(&text));

            let parsed = ContentKey::parse(&text).unwrap();
            assert_eq!(&parsed, key);
            assert!(cm.has_key(&parsed, Some("widgets")));
            assert!(cm.has_key(&parsed, None));
            assert!(!cm.has_key(&parsed, Some("string")));
            assert!(cm.get(&parsed).is_some());
        }
        assert_eq!(cm.partition_len("widgets"), 2);
        assert!(cm.check_invariants().is_ok());
    }

    #[test]
    fn invalid_partition_falls_back_to_content_type() {
        let mut cm = store();
        let key = cm.add(Value::from(true), None, Some("bad_name"));
        assert_eq!(key.partition(), ContentType::Boolean.as_str());
        let empty = cm.add(Value::from(false), None, Some(""));
        assert_eq!(empty.partition(), "boolean");
    }

    #[test]
    fn keys_are_unique_and_sequential_per_partition() {
        let mut cm = store();
        let a = cm.add(Value::from("a"), None, None);
        let b = cm.add(Value::from("a"), None, None);
        let n = cm.add(Value::from(1), None, None);
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "cm_string_1");
        assert_eq!(b.to_string(), "cm_string_2");
        assert_eq!(n.to_string(), "cm_number_1");
    }

    #[test]
    fn sequences_do_not_restart_after_partition_is_pruned() {
        let mut cm = store();
        let a = cm.add(Value::from("a"), None, None);
        cm.remove(std::slice::from_ref(&a));
        assert!(!cm.has_type("string"));
        let b = cm.add(Value::from("a"), None, None);
        assert_eq!(b.sequence(), 2);
    }

    #[test]
    fn add_unique_is_idempotent() {
        let mut cm = store();
        let first = cm.add_unique(Value::from("dup"), None, None);
        let second = cm.add_unique(Value::from("dup"), None, None);
        assert_eq!(first, second);
        assert_eq!(cm.len(), 1);

        let other = cm.add_unique(Value::from("dup"), None, Some("elsewhere"));
        assert_ne!(other, first);
        assert_eq!(cm.len(), 2);
    }

    #[test]
    fn content_positions_respect_partition() {
        let mut cm = store();
        let a = cm.add(Value::from("v"), None, None);
        let b = cm.add(Value::from("v"), None, Some("custom"));
        cm.add(Value::from("w"), None, None);

        let found = cm.content_positions(&Value::from("v"), None);
        assert_eq!(found, vec![ContentPosition::of(&a)]);

        let custom = cm.content_positions(&Value::from("v"), Some("custom"));
        assert_eq!(custom, vec![ContentPosition::of(&b)]);

        assert!(cm.has_content(&Value::from("w"), None));
        assert!(!cm.has_content(&Value::from("w"), Some("custom")));
        assert!(cm.content_positions(&Value::from("v"), Some("nope")).is_empty());
    }

    #[test]
    fn meta_positions_search_all_partitions_by_default() {
        let mut cm = store();
        let a = cm.add(Value::from("a"), Some(Value::from("tag")), None);
        let b = cm.add(Value::from(1), Some(Value::from("tag")), None);
        cm.add(Value::from(2), Some(Value::from("other")), None);

        let mut all = cm.meta_positions(&Value::from("tag"), None);
        all.sort();
        let mut expected = vec![ContentPosition::of(&a), ContentPosition::of(&b)];
        expected.sort();
        assert_eq!(all, expected);

        let numbers = cm.meta_positions(&Value::from("tag"), Some("number"));
        assert_eq!(numbers, vec![ContentPosition::of(&b)]);
    }

    #[test]
    fn is_valid_key_checks_shape() {
        assert!(ContentManager::<Value>::is_valid_key("cm_string_1"));
        assert!(ContentManager::<Value>::is_valid_key("x_priority_99"));
        assert!(!ContentManager::<Value>::is_valid_key("cm_string"));
        assert!(!ContentManager::<Value>::is_valid_key("garbage"));
        assert!(ContentManager::<Value>::is_valid_key("cm_string_x"));
        assert!(ContentManager::<Value>::is_valid_key("a_b_c"));
        assert!(ContentManager::<Value>::is_valid_key("cm_string_1_2"));
        assert!(!ContentManager::<Value>::is_valid_key("cm__1"));
    }

    #[test]
    fn has_key_counts_pinned_unknown_keys() {
        let mut cm = store();
        let ghost = ContentKey::parse("cm_string_40").unwrap();
        assert!(!cm.has_key(&ghost, None));
        cm.using(&ghost, true);
        assert!(cm.has_key(&ghost, None));
        cm.unused(&ghost);
        assert!(!cm.has_key(&ghost, None));
    }

    #[test]
    fn has_key_with_other_partition_is_false() {
        let mut cm = store();
        let key = cm.add(Value::from("a"), None, None);
        assert!(cm.has_key(&key, None));
        assert!(cm.has_key(&key, Some("string")));
        assert!(!cm.has_key(&key, Some("number")));
    }

    #[test]
    fn get_returns_detached_copy() {
        let mut cm = store();
        let key = cm.add(Value::from(vec![Value::from(1)]), None, None);
        let mut copy = cm.get(&key).unwrap();
        copy.content = Value::from("changed");
        copy.meta = Some(Value::from(true));
        assert_eq!(cm.get_content(&key, Value::Null), Value::from(vec![Value::from(1)]));
        assert_eq!(cm.peek(&key).unwrap().meta, None);

        let mut partition = cm.get_type("array").unwrap();
        partition.clear();
        assert_eq!(cm.partition_len("array"), 1);
        assert!(cm.get_type("missing").is_none());
    }

    #[test]
    fn accessors_fall_back_to_default() {
        let cm = store();
        let missing = ContentKey::parse("cm_string_1").unwrap();
        assert_eq!(cm.get(&missing), None);
        assert_eq!(cm.get_content(&missing, Value::from("d")), Value::from("d"));
        assert_eq!(cm.get_meta(&missing, Value::from(0)), Value::from(0));
    }

    #[test]
    fn update_keeps_meta_unless_supplied() {
        let mut cm = store();
        let key = cm.add(Value::from("a"), Some(Value::from("m")), None);

        assert!(cm.update(&key, Value::from("b")));
        assert_eq!(cm.get(&key).unwrap().meta, Some(Value::from("m")));

        assert!(cm.update_with_meta(&key, Value::from("c"), None));
        let entry = cm.get(&key).unwrap();
        assert_eq!(entry.content, Value::from("c"));
        assert_eq!(entry.meta, None);

        assert!(cm.update_meta(&key, Some(Value::from(5))));
        assert_eq!(cm.get_meta(&key, Value::Null), Value::from(5));
    }

    #[test]
    fn update_on_absent_key_fails() {
        let mut cm = store();
        let key = ContentKey::parse("cm_string_3").unwrap();
        assert!(!cm.update(&key, Value::from(1)));
        assert!(!cm.update_with_meta(&key, Value::from(1), None));
        assert!(!cm.update_meta(&key, None));
        assert!(cm.is_empty());
    }

    #[test]
    fn remove_prunes_partitions_and_pins() {
        let mut cm = store();
        let key = cm.add(Value::from("a"), None, None);
        cm.using(&key, true);

        let removed = cm.remove(std::slice::from_ref(&key));
        assert_eq!(removed, vec![ContentPosition::of(&key)]);
        assert!(!cm.has_key(&key, None));
        assert!(!cm.is_using(&key));
        assert!(cm.types().is_empty());
        assert!(cm.remove(&[key]).is_empty());
    }

    #[test]
    fn remove_skips_unknown_keys() {
        let mut cm = store();
        let kept = cm.add(Value::from(1), None, None);
        let unknown = ContentKey::parse("zz_number_1").unwrap();
        assert!(cm.remove(&[unknown]).is_empty());
        assert!(cm.has_key(&kept, None));
    }

    #[test]
    fn remove_content_removes_all_equal_entries() {
        let mut cm = store();
        cm.add(Value::from("x"), None, None);
        cm.add(Value::from("x"), None, None);
        let other = cm.add(Value::from("y"), None, None);

        assert_eq!(cm.remove_content(&Value::from("x"), None).len(), 2);
        assert_eq!(cm.len(), 1);
        assert!(cm.has_key(&other, None));
    }

    #[test]
    fn remove_using_and_unusing_split_the_store() {
        let mut cm = store();
        let pinned = cm.add(Value::from(1), None, None);
        let loose = cm.add(Value::from(2), None, None);
        cm.using(&pinned, true);

        let removed = cm.remove_unusing();
        assert_eq!(removed, vec![ContentPosition::of(&loose)]);
        assert!(cm.has_key(&pinned, None));

        let removed = cm.remove_using();
        assert_eq!(removed, vec![ContentPosition::of(&pinned)]);
        assert!(cm.is_empty());
        assert_eq!(cm.status().using, 0);
    }

    #[test]
    fn using_false_unpins() {
        let mut cm = store();
        let key = cm.add(Value::from(1), None, None);
        cm.using(&key, true);
        assert!(cm.is_using(&key));
        cm.using(&key, false);
        assert!(!cm.is_using(&key));
        assert!(cm.has_key(&key, None));
    }

    #[test]
    fn status_reports_pins_and_keys() {
        let mut cm = store();
        let a = cm.add(Value::from("a"), None, None);
        let b = cm.add(Value::from("b"), None, None);
        let n = cm.add(Value::from(1), None, None);
        cm.using(&n, true);

        let status = cm.status();
        assert_eq!(status.using, 1);
        assert_eq!(status.types.get("string"), Some(&vec![a, b]));
        assert_eq!(status.types.get("number"), Some(&vec![n]));
    }

    #[test]
    fn clean_empties_everything() {
        let mut cm = store();
        let key = cm.add(Value::from(1), None, None);
        cm.using(&key, true);
        cm.clean();
        assert!(cm.is_empty());
        assert!(!cm.has_key(&key, None));
        assert_eq!(cm.status(), ContentStatus::default());
    }

    #[test]
    fn prefix_validation() {
        assert!(ContentManager::<Value>::try_with_prefix("").is_err());
        assert!(ContentManager::<Value>::try_with_prefix("a_b").is_err());
        let mut cm = ContentManager::<Value>::with_prefix("ui");
        let key = cm.add(Value::from(1), None, None);
        assert_eq!(key.to_string(), "ui_number_1");
    }

    #[test]
    #[should_panic(expected = "key prefix")]
    fn with_prefix_panics_on_invalid_prefix() {
        let _ = ContentManager::<Value>::with_prefix("bad_prefix");
    }

    #[test]
    fn invariants_hold_after_mixed_operations() {
        let mut cm = store();
        let a = cm.add(Value::from("a"), None, None);
        cm.add(Value::from(1), None, Some("custom"));
        cm.using(&a, true);
        cm.remove(&[a]);
        cm.add_unique(Value::from(1), None, Some("custom"));
        assert!(cm.check_invariants().is_ok());
    }
}
