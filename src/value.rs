//! Dynamic values and the content-type classifier.
//!
//! The stores hold arbitrary page-side data: strings, numbers, flags, lists,
//! records and callbacks. [`Value`] models that as a closed tagged union and
//! [`ContentType`] is the partition tag derived from a value's shape.
//!
//! ## Classification
//!
//! ```text
//!   Value::String(_)    ──► ContentType::String    "string"
//!   Value::Number(_)    ──► ContentType::Number    "number"
//!   Value::Bool(_)      ──► ContentType::Boolean   "boolean"
//!   Value::Array(_)     ──► ContentType::Array     "array"
//!   Value::Function(_)  ──► ContentType::Function  "function"
//!   Value::Object(_)    ──► ContentType::Object    "object"
//!   Value::Null         ──► ContentType::Mixed     "mixed"
//! ```
//!
//! ## Equality
//!
//! Equality is deep for data variants. Callbacks compare by identity: two
//! [`Callback`]s are equal only when they share the same allocation.
//!
//! ## Example Usage
//!
//! ```
//! use contentkit::traits::Classify;
//! use contentkit::value::{ContentType, Value};
//!
//! let v = Value::from(vec![Value::from(1), Value::from("a")]);
//! assert_eq!(v.content_type(), ContentType::Array);
//! assert_eq!(ContentType::Array.as_str(), "array");
//! assert_eq!(Value::from(" 42 ").as_number(), 42.0);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::traits::Classify;

/// Partition tag derived from a value's runtime shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    String,
    Number,
    Boolean,
    Array,
    Function,
    Object,
    Mixed,
}

impl ContentType {
    /// All tags, in declaration order.
    pub const ALL: [ContentType; 7] = [
        ContentType::String,
        ContentType::Number,
        ContentType::Boolean,
        ContentType::Array,
        ContentType::Function,
        ContentType::Object,
        ContentType::Mixed,
    ];

    /// Stable lowercase name used as the partition name and key segment.
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentType::String => "string",
            ContentType::Number => "number",
            ContentType::Boolean => "boolean",
            ContentType::Array => "array",
            ContentType::Function => "function",
            ContentType::Object => "object",
            ContentType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type CallbackFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Shared callable stored as content (listener, renderer, ...).
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the callback.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

/// Dynamic value held by the stores.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
    Function(Callback),
}

impl Value {
    /// Wraps a closure as a [`Value::Function`].
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Function(Callback::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value; anything non-numeric reads as `0`.
    ///
    /// ```
    /// use contentkit::value::Value;
    ///
    /// assert_eq!(Value::from(2.5).as_number(), 2.5);
    /// assert_eq!(Value::from(true).as_number(), 1.0);
    /// assert_eq!(Value::from("abc").as_number(), 0.0);
    /// assert_eq!(Value::Null.as_number(), 0.0);
    /// ```
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) if n.is_finite() => *n,
            Value::Bool(true) => 1.0,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// List view of the value: arrays as-is, `Null` as empty, scalars wrapped.
    pub fn into_array(self) -> Vec<Value> {
        match self {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl Classify for Value {
    fn content_type(&self) -> ContentType {
        match self {
            Value::String(_) => ContentType::String,
            Value::Number(_) => ContentType::Number,
            Value::Bool(_) => ContentType::Boolean,
            Value::Array(_) => ContentType::Array,
            Value::Function(_) => ContentType::Function,
            Value::Object(_) => ContentType::Object,
            Value::Null => ContentType::Mixed,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Number(v as f64)
                }
            }
        )*
    };
}

impl_from_int!(i32, i64, u32, u64, usize);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Object(v)
    }
}

impl From<Callback> for Value {
    fn from(v: Callback) -> Self {
        Value::Function(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_covers_every_variant() {
        let mut obj = BTreeMap::new();
        obj.insert("k".to_string(), Value::from(1));

        assert_eq!(Value::from("s").content_type(), ContentType::String);
        assert_eq!(Value::from(3).content_type(), ContentType::Number);
        assert_eq!(Value::from(false).content_type(), ContentType::Boolean);
        assert_eq!(Value::from(vec![]).content_type(), ContentType::Array);
        assert_eq!(
            Value::function(|_| Value::Null).content_type(),
            ContentType::Function
        );
        assert_eq!(Value::from(obj).content_type(), ContentType::Object);
        assert_eq!(Value::Null.content_type(), ContentType::Mixed);
    }

    #[test]
    fn content_type_names_are_distinct_partition_names() {
        let mut names: Vec<&str> = ContentType::ALL.iter().map(|tag| tag.as_str()).collect();
        for tag in ContentType::ALL {
            assert_eq!(tag.to_string(), tag.as_str());
            assert!(crate::store::content::is_valid_partition(tag.as_str()));
        }
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ContentType::ALL.len());
    }

    #[test]
    fn deep_equality_for_nested_data() {
        let a = Value::from(vec![Value::from("x"), Value::from(vec![Value::from(1)])]);
        let b = Value::from(vec![Value::from("x"), Value::from(vec![Value::from(1)])]);
        let c = Value::from(vec![Value::from("x"), Value::from(vec![Value::from(2)])]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn callbacks_compare_by_identity() {
        let cb = Callback::new(|args| Value::from(args.len()));
        let same = Value::Function(cb.clone());
        let other = Value::function(|args| Value::from(args.len()));

        assert_eq!(Value::Function(cb.clone()), same);
        assert_ne!(same, other);
        assert_eq!(cb.call(&[Value::Null, Value::Null]), Value::from(2));
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::from(-4).as_number(), -4.0);
        assert_eq!(Value::from("1.5").as_number(), 1.5);
        assert_eq!(Value::from("nan").as_number(), 0.0);
        assert_eq!(Value::from(false).as_number(), 0.0);
        assert_eq!(Value::from(vec![Value::from(1)]).as_number(), 0.0);
        assert_eq!(Value::Number(f64::INFINITY).as_number(), 0.0);
    }

    #[test]
    fn array_coercion_wraps_scalars() {
        assert_eq!(Value::from("a").into_array(), vec![Value::from("a")]);
        assert_eq!(Value::Null.into_array(), Vec::<Value>::new());
        assert_eq!(
            Value::from(vec![Value::from(1), Value::from(2)]).into_array(),
            vec![Value::from(1), Value::from(2)]
        );
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
