//! Emulated insertion-ordered map (`java.util.LinkedHashMap`)

use super::hash::HashKey;
use crate::value::{RuntimeError, RuntimeResult, Value};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Key-value collection that iterates in insertion order. Clones share the same storage.
///
/// Only hashable values (number, string, bool, null) can be used as keys.
#[derive(Clone, Default)]
pub struct OrderedMap {
    inner: Rc<RefCell<IndexMap<HashKey, Value>>>,
}

impl OrderedMap {
    /// Create new empty map
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (HashKey, Value)>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(entries.into_iter().collect())),
        }
    }

    /// Seed a map from a native keyed input
    ///
    /// Accepts null (empty map), a host keyed bag, another map or an expando.
    /// Values are copied shallowly.
    pub fn from_native(input: &Value) -> RuntimeResult<Self> {
        match input {
            Value::Null => Ok(Self::new()),
            Value::Object(obj) => Ok(Self::from_entries(
                obj.entries()
                    .into_iter()
                    .map(|(k, v)| (HashKey::string(k), v)),
            )),
            Value::Map(map) => Ok(Self::from_entries(map.entries())),
            Value::Expando(expando) => Ok(Self::from_entries(
                expando
                    .properties()
                    .into_iter()
                    .map(|(k, v)| (HashKey::string(k), v)),
            )),
            other => Err(RuntimeError::TypeError {
                msg: format!("cannot build a map from {}", other.describe_type()),
            }),
        }
    }

    /// Insert an entry, returning the same map for chaining
    pub fn add(&self, key: impl Into<Value>, value: impl Into<Value>) -> RuntimeResult<Self> {
        self.put(&key.into(), value.into())?;
        Ok(self.clone())
    }

    /// Insert or overwrite, returning the previous value
    pub fn put(&self, key: &Value, value: Value) -> RuntimeResult<Option<Value>> {
        let key = HashKey::from_value(key)?;
        Ok(self.insert(key, value))
    }

    pub fn insert(&self, key: HashKey, value: Value) -> Option<Value> {
        self.inner.borrow_mut().insert(key, value)
    }

    /// Lookup by key value; unhashable keys are simply absent
    pub fn get(&self, key: &Value) -> Option<Value> {
        let key = HashKey::from_value(key).ok()?;
        self.inner.borrow().get(&key).cloned()
    }

    /// Lookup by string key, as property access does
    pub fn property(&self, name: &str) -> Option<Value> {
        self.inner.borrow().get(&HashKey::string(name)).cloned()
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        match HashKey::from_value(key) {
            Ok(key) => self.inner.borrow().contains_key(&key),
            Err(_) => false,
        }
    }

    /// Remove an entry, keeping the order of the rest
    pub fn remove(&self, key: &Value) -> Option<Value> {
        let key = HashKey::from_value(key).ok()?;
        self.inner.borrow_mut().shift_remove(&key)
    }

    pub fn size(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    pub fn keys(&self) -> Vec<Value> {
        self.inner.borrow().keys().map(HashKey::to_value).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.inner.borrow().values().cloned().collect()
    }

    /// Snapshot of the entries in insertion order
    pub fn entries(&self) -> Vec<(HashKey, Value)> {
        self.inner
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// New map holding this map's entries followed by `other`'s
    pub fn merged(&self, other: &OrderedMap) -> Self {
        let merged = Self::from_entries(self.entries());
        for (key, value) in other.entries() {
            merged.insert(key, value);
        }
        merged
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
