//! Argument values for recorded invocations
//!
//! This module defines:
//! - Value: Unified enum for anything passed to (or returned from) a surrogate
//! - Arguments: The ordered argument tuple of one invocation
//!
//! ## Equality
//!
//! Invocation queries compare argument tuples by deep value equality:
//! - `Int(1) != Float(1.0)` - different types are NEVER equal
//! - `Bytes(b"a") != String("a")`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//!
//! ## Rendering
//!
//! `Display` renders values inspect-style so failure messages can show
//! what a surrogate actually received: strings are quoted, arrays and
//! objects are rendered recursively, and an argument tuple renders as
//! `` `1, "two"' `` (or `` `no args' `` when empty).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// A value passed to or returned from a surrogate method
///
/// Objects use a `BTreeMap` so that rendering is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Array of values
    Array(Vec<Value>),
    /// Object with string keys
    Object(BTreeMap<String, Value>),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[Value] if this is an Array value
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(o: BTreeMap<String, Value>) -> Self {
        Value::Object(o)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// The ordered argument tuple of one invocation
///
/// Most calls pass a handful of arguments, so they are stored inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments(SmallVec<[Value; 4]>);

impl Arguments {
    /// An empty argument tuple
    pub fn none() -> Self {
        Arguments(SmallVec::new())
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no arguments were passed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Argument at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Iterate over the arguments in order
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// View the arguments as a slice
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("`")?;
        if self.0.is_empty() {
            f.write_str("no args")?;
        }
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("'")
    }
}

impl<V: Into<Value>> FromIterator<V> for Arguments {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Arguments(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Arguments(SmallVec::from_vec(values))
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build an [`Arguments`] tuple from anything convertible into [`Value`]
///
/// ```
/// use surrogate_core::{args, Value};
///
/// let a = args![12, "456-7890"];
/// assert_eq!(a.len(), 2);
/// assert_eq!(a.get(0), Some(&Value::Int(12)));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::value::Arguments::none()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::value::Arguments::from(vec![$($crate::value::Value::from($arg)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    static_assertions::assert_impl_all!(Value: Send, Sync, Clone);
    static_assertions::assert_impl_all!(Arguments: Send, Sync, Clone);

    #[test]
    fn test_value_int_is_not_float() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn test_value_bytes_is_not_string() {
        assert_ne!(Value::from(&b"a"[..]), Value::from("a"));
    }

    #[test]
    fn test_value_float_ieee_equality() {
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
    }

    #[test]
    fn test_value_deep_equality() {
        let nested = || {
            let mut obj = BTreeMap::new();
            obj.insert("area".to_string(), Value::from("123"));
            obj.insert("numbers".to_string(), Value::from(vec![Value::Int(1), Value::Int(2)]));
            Value::Object(obj)
        };
        assert_eq!(nested(), nested());

        let mut other = BTreeMap::new();
        other.insert("area".to_string(), Value::from("123"));
        assert_ne!(nested(), Value::Object(other));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::from("Josh").to_string(), "\"Josh\"");
        assert_eq!(
            Value::from(vec![Value::from("a"), Value::Int(1)]).to_string(),
            "[\"a\", 1]"
        );
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_arguments_display() {
        assert_eq!(args![].to_string(), "`no args'");
        assert_eq!(args![12].to_string(), "`12'");
        assert_eq!(args!["123", "456-7890"].to_string(), "`\"123\", \"456-7890\"'");
    }

    #[test]
    fn test_arguments_equality_is_positional() {
        assert_eq!(args![1, 2], args![1, 2]);
        assert_ne!(args![1, 2], args![2, 1]);
        assert_ne!(args![1], args![1, 1]);
    }

    #[test]
    fn test_arguments_from_iterator() {
        let a: Arguments = (1i64..=3).map(Value::Int).collect();
        assert_eq!(a.len(), 3);
        assert_eq!(a.as_slice()[2], Value::Int(3));
        assert!(Arguments::none().is_empty());
    }

    #[test]
    fn test_value_serializes() {
        let json = serde_json::to_string(&Value::Int(3)).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Value::Int(3));
    }
}
