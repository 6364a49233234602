//! The tagged-union node of a JSON document tree.
//!
//! A [`Value`] holds exactly one kind at a time. Typed accessors (`to_int`,
//! `to_str`, `to_array`, ...) never coerce across kinds: asking a boolean for
//! its string fails with [`JsonError::TypeMismatch`]. The only cross-kind reads
//! allowed are between the three numeric kinds, which convert on access.
//!
//! # Example
//! ```
//! use sarif_json::{Object, Value};
//!
//! let mut root = Value::from(Object::new());
//! root["name"] = Value::from("PREfast");
//! root["count"] = Value::from(3);
//! assert_eq!(root["count"].to_int().unwrap(), 3);
//! assert!(Value::from(true).to_str().is_err());
//! ```

use crate::array::Array;
use crate::error::{JsonError, Result};
use crate::object::Object;
use std::fmt;
use std::ops::{Index, IndexMut};

static NULL: Value = Value::Null;

/// Discriminant of a [`Value`], rendered with the tag names used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Double,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Tag name of the kind, e.g. `StringVal`.
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "NULLVal",
            ValueKind::Bool => "BoolVal",
            ValueKind::Int => "IntVal",
            ValueKind::Float => "FloatVal",
            ValueKind::Double => "DoubleVal",
            ValueKind::String => "StringVal",
            ValueKind::Array => "ArrayVal",
            ValueKind::Object => "ObjectVal",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON document node. Containers own their children, so a `Value` is
/// always a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Float(f32),
    Double(f64),
    String(String),
    Array(Array),
    Object(Object),
}

const NUMERIC: &str = "IsNumeric";

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    fn mismatch(&self, expected: ValueKind) -> JsonError {
        JsonError::TypeMismatch {
            expected: expected.name(),
            actual: self.kind(),
        }
    }

    fn not_numeric(&self) -> JsonError {
        JsonError::TypeMismatch {
            expected: NUMERIC,
            actual: self.kind(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True only for the Int, Float and Double kinds.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Double(_))
    }

    /// Integer view of a numeric value. Floating kinds truncate toward zero.
    pub fn to_int(&self) -> Result<i32> {
        match *self {
            Value::Int(i) => Ok(i),
            Value::Float(f) => Ok(f as i32),
            Value::Double(d) => Ok(d as i32),
            _ => Err(self.not_numeric()),
        }
    }

    pub fn to_float(&self) -> Result<f32> {
        match *self {
            Value::Int(i) => Ok(i as f32),
            Value::Float(f) => Ok(f),
            Value::Double(d) => Ok(d as f32),
            _ => Err(self.not_numeric()),
        }
    }

    pub fn to_double(&self) -> Result<f64> {
        match *self {
            Value::Int(i) => Ok(f64::from(i)),
            Value::Float(f) => Ok(f64::from(f)),
            Value::Double(d) => Ok(d),
            _ => Err(self.not_numeric()),
        }
    }

    pub fn to_bool(&self) -> Result<bool> {
        match *self {
            Value::Bool(b) => Ok(b),
            _ => Err(self.mismatch(ValueKind::Bool)),
        }
    }

    pub fn to_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueKind::String)),
        }
    }

    pub fn to_object(&self) -> Result<&Object> {
        match self {
            Value::Object(obj) => Ok(obj),
            _ => Err(self.mismatch(ValueKind::Object)),
        }
    }

    pub fn to_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(obj) => Ok(obj),
            _ => Err(self.mismatch(ValueKind::Object)),
        }
    }

    pub fn to_array(&self) -> Result<&Array> {
        match self {
            Value::Array(arr) => Ok(arr),
            _ => Err(self.mismatch(ValueKind::Array)),
        }
    }

    /// Writable view of an Array value, used to append in place.
    pub fn to_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Value::Array(arr) => Ok(arr),
            _ => Err(self.mismatch(ValueKind::Array)),
        }
    }

    /// Element count for containers, 1 for every scalar kind (Null included).
    pub fn size(&self) -> usize {
        match self {
            Value::Array(arr) => arr.len(),
            Value::Object(obj) => obj.len(),
            _ => 1,
        }
    }

    /// Reset to Null regardless of the current kind.
    pub fn clear(&mut self) {
        *self = Value::Null;
    }

    pub fn has_key(&self, key: &str) -> Result<bool> {
        Ok(self.to_object()?.has_key(key))
    }

    /// Index of the first key that is missing, or `None` when all are present.
    pub fn has_keys<K: AsRef<str>>(&self, keys: &[K]) -> Result<Option<usize>> {
        Ok(self.to_object()?.has_keys(keys))
    }

    /// Object member lookup without insertion. `None` for non-objects too.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.get(key),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Writes the pretty-printed document text, see [`crate::serialize`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serializer::serialize(self))
    }
}

// Indexing cannot report errors, so a kind mismatch panics with the same
// message the accessors return.

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, idx: usize) -> &Value {
        match self {
            Value::Array(arr) => &arr[idx],
            _ => panic!("{}", self.mismatch(ValueKind::Array)),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, idx: usize) -> &mut Value {
        match self {
            Value::Array(arr) => &mut arr[idx],
            other => panic!("{}", other.mismatch(ValueKind::Array)),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Missing keys read as Null without being inserted.
    fn index(&self, key: &str) -> &Value {
        match self {
            Value::Object(obj) => obj.get(key).unwrap_or(&NULL),
            _ => panic!("{}", self.mismatch(ValueKind::Object)),
        }
    }
}

impl IndexMut<&str> for Value {
    /// Missing keys are inserted as Null and appended to the key order.
    fn index_mut(&mut self, key: &str) -> &mut Value {
        match self {
            Value::Object(obj) => obj.get_or_insert_mut(key),
            other => panic!("{}", other.mismatch(ValueKind::Object)),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}
