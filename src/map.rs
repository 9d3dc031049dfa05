//! Ordered map type for config blocks.
//!
//! This module provides [`ConfMap`], a wrapper around [`IndexMap`] that keeps
//! keys in the order they were read from the file (or inserted), so writing a
//! config back out does not shuffle its settings.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tellstick::{ConfMap, Value};
//!
//! let mut map = ConfMap::new();
//! map.insert("name", Value::from("Lamp"));
//! map.insert("id", Value::from(1));
//!
//! let keys: Vec<_> = map.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["name", "id"]);
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An insertion-ordered map of setting names to scalar values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfMap(IndexMap<String, Value>);

impl ConfMap {
    /// Creates an empty `ConfMap`.
    #[must_use]
    pub fn new() -> Self {
        ConfMap(IndexMap::new())
    }

    /// Creates an empty `ConfMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ConfMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// A key that is already present keeps its position and gets the new
    /// value; the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tellstick::{ConfMap, Value};
    ///
    /// let mut map = ConfMap::new();
    /// map.insert("a", Value::from(1));
    /// map.insert("b", Value::from(2));
    /// assert_eq!(map.insert("a", Value::from(3)), Some(Value::from(1)));
    ///
    /// let keys: Vec<_> = map.keys().map(String::as_str).collect();
    /// assert_eq!(keys, ["a", "b"]);
    /// ```
    pub fn insert<K: Into<String>>(&mut self, key: K, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for ConfMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for ConfMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        ConfMap(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, Value)> for ConfMap {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl Serialize for ConfMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConfMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ConfMapVisitor;

        impl<'de> Visitor<'de> for ConfMapVisitor {
            type Value = ConfMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of setting names to numbers or strings")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut map = ConfMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ConfMapVisitor)
    }
}
