//! Insertion-ordered string-keyed mapping.
//!
//! Serialization walks keys in first-insertion order, so the map is an
//! [`IndexMap`]: every key appears exactly once in the order and overwriting a
//! key keeps its original position.

use crate::array::Array;
use crate::error::Result;
use crate::value::Value;
use indexmap::IndexMap;
use std::ops::{Index, IndexMut};

static NULL: Value = Value::Null;

/// A JSON object whose keys iterate in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    values: IndexMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-insert: an absent key is inserted as Null and appended to the
    /// key order before the reference is returned.
    pub fn get_or_insert_mut(&mut self, key: &str) -> &mut Value {
        self.values.entry(key.to_string()).or_insert(Value::Null)
    }

    /// Set `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.values.get_mut(key)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Index of the first key that is missing, or `None` when all are present.
    pub fn has_keys<K: AsRef<str>>(&self, keys: &[K]) -> Option<usize> {
        keys.iter().position(|key| !self.has_key(key.as_ref()))
    }

    /// Array stored under `key`, created empty when the key is absent.
    ///
    /// Fails with a type mismatch when the key holds something other than an
    /// Array.
    pub fn get_array_element(&mut self, key: &str) -> Result<&mut Array> {
        let slot = self
            .values
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Array::new()));
        slot.to_array_mut()
    }

    /// Object stored under `key`, created empty when the key is absent.
    pub fn get_object_element(&mut self, key: &str) -> Result<&mut Object> {
        let slot = self
            .values
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Object::new()));
        slot.to_object_mut()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.values.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.values.iter_mut()
    }
}

impl Index<&str> for Object {
    type Output = Value;

    /// Missing keys read as Null without being inserted.
    fn index(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for Object {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.get_or_insert_mut(key)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut obj = Object::new();
        for (key, value) in iter {
            obj.insert(key, value);
        }
        obj
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
