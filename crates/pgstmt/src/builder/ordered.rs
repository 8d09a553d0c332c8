//! Insertion-ordered unique-key association used by the builder's
//! parameter collections.

use std::collections::HashMap;

/// An ordered association: iteration follows first-insertion order, keys are
/// unique, and inserting an existing key overwrites the value without moving
/// the key's position.
#[derive(Debug, Clone)]
pub struct OrderedParams<V> {
    keys: Vec<String>,
    values: HashMap<String, V>,
}

impl<V> Default for OrderedParams<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedParams<V> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Insert or update. A new key is appended; an existing key keeps its
    /// original position and only the value changes.
    pub fn insert(&mut self, key: &str, value: V) {
        if self.values.insert(key.to_string(), value).is_none() {
            self.keys.push(key.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
