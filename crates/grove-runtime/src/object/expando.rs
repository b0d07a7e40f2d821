//! Open-field dynamic object (`groovy.util.Expando`)

use crate::value::Value;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Property bag whose callable properties can be invoked as methods
#[derive(Clone, Default)]
pub struct Expando {
    inner: Rc<RefCell<IndexMap<String, Value>>>,
}

impl Expando {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.inner.borrow().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: Value) {
        self.inner.borrow_mut().insert(name.to_string(), value);
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.inner.borrow_mut().shift_remove(name)
    }

    pub fn properties(&self) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
