//! Instances of user-defined classes

use super::class::{Class, ClassDescriptor};
use crate::value::Value;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

struct InstanceData {
    class: Rc<Class>,
    fields: RefCell<IndexMap<String, Value>>,
}

/// Emulated instance. Clones refer to the same object.
///
/// Fields are open: any name can be set, declared or not.
#[derive(Clone)]
pub struct Instance {
    inner: Rc<InstanceData>,
}

impl Instance {
    pub(crate) fn new(class: Rc<Class>) -> Self {
        Self {
            inner: Rc::new(InstanceData {
                class,
                fields: RefCell::new(IndexMap::new()),
            }),
        }
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.inner.class
    }

    pub fn descriptor(&self) -> &Rc<ClassDescriptor> {
        self.inner.class.descriptor()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.inner.fields.borrow().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: Value) {
        self.inner
            .fields
            .borrow_mut()
            .insert(name.to_string(), value);
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.inner.fields.borrow().contains_key(name)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.inner.fields.borrow().keys().cloned().collect()
    }

    /// Snapshot of the fields in declaration-then-assignment order
    pub fn fields(&self) -> Vec<(String, Value)> {
        self.inner
            .fields
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
