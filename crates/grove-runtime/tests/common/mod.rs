//! Shared test utilities

#![allow(dead_code)]

use grove_runtime::{Class, ClassBuilder, Value};
use std::rc::Rc;

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// Number value shorthand
pub fn num(n: f64) -> Value {
    Value::Number(n)
}

/// Native array of numbers
pub fn numbers(values: &[f64]) -> Value {
    Value::array(values.iter().copied().map(Value::Number).collect())
}

/// Native keyed bag from literal pairs
pub fn bag(entries: &[(&str, Value)]) -> Value {
    Value::object(entries.iter().map(|(k, v)| (k.to_string(), v.clone())))
}

/// Class with fields `a` and `b`, registered under `name`
pub fn my_class(name: &str) -> Rc<Class> {
    ClassBuilder::new(name).field("a").field("b").build()
}

/// Read a field off an instance or map, panicking on anything else
pub fn field(value: &Value, name: &str) -> Value {
    grove_runtime::get_property(value, name).expect("property read failed")
}

/// Class name of a tagged value
pub fn class_name(value: &Value) -> String {
    grove_runtime::class_of(value)
        .map(|d| d.name().to_string())
        .unwrap_or_else(|| panic!("{:?} is not an emulated value", value))
}
