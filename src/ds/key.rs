//! Structured content keys.
//!
//! A [`ContentKey`] is `{prefix, partition, sequence}` and renders as
//! `<prefix>_<partition>_<sequence>`. The partition a key belongs to is part
//! of the key itself, so it never has to be re-derived by string inspection;
//! [`ContentKey::parse`] exists for keys that arrive as text.
//!
//! ```text
//!   "cm_string_12"
//!    ──┬ ───┬── ─┬
//!      │    │    └── sequence  (u64, per prefix+partition)
//!      │    └─────── partition (content type or caller-chosen name)
//!      └──────────── prefix    (store instance namespace)
//! ```
//!
//! Ordering is `(prefix, partition, sequence)`, so keys of one partition sort
//! in creation order.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Key minted by a content store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey {
    prefix: Arc<str>,
    partition: Arc<str>,
    sequence: u64,
}

impl ContentKey {
    /// Builds a key from its parts. Callers guarantee neither `prefix` nor
    /// `partition` is empty and `prefix` has no `_`.
    pub(crate) fn new(prefix: Arc<str>, partition: Arc<str>, sequence: u64) -> Self {
        Self {
            prefix,
            partition,
            sequence,
        }
    }

    /// Parses `<prefix>_<partition>_<sequence>`.
    ///
    /// Returns `None` unless there are at least three `_`-separated segments,
    /// the first two are non-empty and the remainder is a decimal sequence.
    ///
    /// ```
    /// use contentkit::ds::ContentKey;
    ///
    /// let key = ContentKey::parse("cm_string_3").unwrap();
    /// assert_eq!(key.partition(), "string");
    /// assert_eq!(key.sequence(), 3);
    /// assert!(ContentKey::parse("cm_string").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let (prefix, rest) = raw.split_once('_')?;
        let (partition, sequence) = rest.split_once('_')?;
        if prefix.is_empty() || partition.is_empty() {
            return None;
        }
        if sequence.is_empty() || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let sequence = sequence.parse().ok()?;
        Some(Self::new(prefix.into(), partition.into(), sequence))
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Partition (content type) embedded in the key.
    #[inline]
    pub fn partition(&self) -> &str {
        &self.partition
    }

    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

}

/// Returns `true` if `raw` looks like a key: at least three `_`-separated
/// segments with a non-empty second (partition) segment.
///
/// Looser than [`ContentKey::parse`], which also needs a decimal sequence.
///
/// ```
/// use contentkit::ds::key::has_key_shape;
///
/// assert!(has_key_shape("cm_string_x"));
/// assert!(!has_key_shape("cm_string"));
/// ```
pub fn has_key_shape(raw: &str) -> bool {
    let mut segments = raw.split('_').skip(1);
    matches!(
        (segments.next(), segments.next()),
        (Some(partition), Some(_)) if !partition.is_empty()
    )
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.prefix, self.partition, self.sequence)
    }
}

/// Error returned by [`ContentKey::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKey;

impl fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected <prefix>_<partition>_<sequence>")
    }
}

impl std::error::Error for InvalidKey {}

impl FromStr for ContentKey {
    type Err = InvalidKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(InvalidKey)
    }
}
