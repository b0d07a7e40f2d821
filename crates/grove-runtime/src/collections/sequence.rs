//! Emulated list (`java.util.ArrayList`)

use crate::equality::position;
use crate::value::{RuntimeError, RuntimeResult, Value};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Ordered, growable list of values. Clones share the same storage.
#[derive(Clone, Default)]
pub struct Sequence {
    inner: Rc<RefCell<Vec<Value>>>,
}

impl Sequence {
    /// Create new empty list
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(values)),
        }
    }

    /// Seed a list from a native ordered input
    ///
    /// Accepts null (empty list), a host array, another list or a range.
    /// Elements are copied shallowly.
    pub fn from_native(input: &Value) -> RuntimeResult<Self> {
        match input {
            Value::Null => Ok(Self::new()),
            Value::Array(arr) => Ok(Self::from_values(arr.values())),
            Value::List(seq) => Ok(Self::from_values(seq.values())),
            Value::Range(range) => Ok(Self::from_values(range.to_values())),
            other => Err(RuntimeError::TypeError {
                msg: format!("cannot build a list from {}", other.describe_type()),
            }),
        }
    }

    /// Append an element, returning the same list for chaining
    pub fn add(&self, value: impl Into<Value>) -> Self {
        self.inner.borrow_mut().push(value.into());
        self.clone()
    }

    /// Insert at a position, shifting later elements right
    pub fn insert(&self, index: usize, value: Value) -> RuntimeResult<()> {
        let mut items = self.inner.borrow_mut();
        if index > items.len() {
            return Err(RuntimeError::OutOfBounds {
                index: index as i64,
                size: items.len(),
            });
        }
        items.insert(index, value);
        Ok(())
    }

    pub fn extend(&self, values: impl IntoIterator<Item = Value>) {
        self.inner.borrow_mut().extend(values);
    }

    pub fn size(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Element at `index`; negative indexes count from the end
    pub fn get(&self, index: i64) -> Option<Value> {
        let items = self.inner.borrow();
        let resolved = if index < 0 {
            items.len() as i64 + index
        } else {
            index
        };
        if resolved < 0 {
            return None;
        }
        items.get(resolved as usize).cloned()
    }

    /// Replace the element at `index`, padding with nulls past the end
    pub fn set(&self, index: usize, value: Value) {
        let mut items = self.inner.borrow_mut();
        if index >= items.len() {
            items.resize(index + 1, Value::Null);
        }
        items[index] = value;
    }

    /// Remove by position
    pub fn remove_at(&self, index: usize) -> RuntimeResult<Value> {
        let mut items = self.inner.borrow_mut();
        if index >= items.len() {
            return Err(RuntimeError::OutOfBounds {
                index: index as i64,
                size: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    /// Remove the first element structurally equal to `value`
    /// Remove the first element structurally equal to `value`
    ///
    /// # Errors
    /// Propagates a failing user-defined `equals` method
    pub fn remove_value(&self, value: &Value) -> RuntimeResult<bool> {
        match self.index_of(value)? {
            Some(index) => {
                self.inner.borrow_mut().remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Membership by structural equality
    pub fn contains(&self, value: &Value) -> RuntimeResult<bool> {
        Ok(self.index_of(value)?.is_some())
    }

    pub fn index_of(&self, value: &Value) -> RuntimeResult<Option<usize>> {
        // Snapshot so a user-defined equals can touch this list
        position(&self.values(), value)
    }

    pub fn first(&self) -> Option<Value> {
        self.inner.borrow().first().cloned()
    }

    pub fn last(&self) -> Option<Value> {
        self.inner.borrow().last().cloned()
    }

    /// Join element renderings with a separator
    pub fn join(&self, separator: &str) -> String {
        self.inner
            .borrow()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// New list with elements in reverse order
    pub fn reversed(&self) -> Self {
        let mut items = self.values();
        items.reverse();
        Self::from_values(items)
    }

    /// Borrow the elements without copying
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.inner.borrow()
    }

    /// Snapshot of the current elements
    pub fn values(&self) -> Vec<Value> {
        self.inner.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(values: &[f64]) -> Vec<Value> {
        values.iter().map(|n| Value::Number(*n)).collect()
    }

    #[test]
    fn test_add_chains_on_same_list() {
        let list = Sequence::new();
        let returned = list.add(1).add("two");
        assert!(returned.ptr_eq(&list));
        assert_eq!(list.size(), 2);
        assert_eq!(list.get(1), Some(Value::string("two")));
    }

    #[test]
    fn test_from_native_copies_array() {
        let arr = Value::array(nums(&[1.0, 2.0]));
        let list = Sequence::from_native(&arr).unwrap();
        list.add(3);
        match arr {
            Value::Array(arr) => assert_eq!(arr.len(), 2),
            _ => unreachable!(),
        }
        assert_eq!(list.size(), 3);
    }

    #[test]
    fn test_from_native_rejects_scalars() {
        assert!(Sequence::from_native(&Value::Number(1.0)).is_err());
        assert!(Sequence::from_native(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_negative_index() {
        let list = Sequence::from_values(nums(&[1.0, 2.0, 3.0]));
        assert_eq!(list.get(-1), Some(Value::Number(3.0)));
        assert_eq!(list.get(-4), None);
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn test_set_pads_with_null() {
        let list = Sequence::new();
        list.set(2, Value::Number(9.0));
        assert_eq!(list.size(), 3);
        assert_eq!(list.get(0), Some(Value::Null));
    }

    #[test]
    fn test_contains_is_structural() {
        let list = Sequence::new();
        list.add(Value::array(nums(&[1.0])));
        assert!(list.contains(&Value::list(nums(&[1.0]))).unwrap());
        assert!(!list.contains(&Value::Number(1.0)).unwrap());
    }

    #[test]
    fn test_remove() {
        let list = Sequence::from_values(nums(&[1.0, 2.0, 3.0]));
        assert!(list.remove_value(&Value::Number(2.0)).unwrap());
        assert!(!list.remove_value(&Value::Number(7.0)).unwrap());
        assert_eq!(list.remove_at(0).unwrap(), Value::Number(1.0));
        assert!(matches!(
            list.remove_at(5),
            Err(RuntimeError::OutOfBounds { index: 5, size: 1 })
        ));
    }

    #[test]
    fn test_join() {
        let list = Sequence::from_values(vec![Value::Number(1.0), Value::string("a"), Value::Null]);
        assert_eq!(list.join(", "), "1, a, null");
    }
}
