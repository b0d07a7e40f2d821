//! Runtime value representation
//!
//! One value type covers both halves of the runtime:
//! - Null, Bool, Number, String: host scalars (immediate or immutable)
//! - Array, Object, Function: host-native containers and callables, with reference identity
//! - List, Map, Instance, Date, Range, StringBuffer, Pattern, Expando: emulated values,
//!   tagged as members of the emulated object system
//!
//! `PartialEq` on `Value` is the host's strict equality (`===`): scalars compare by value,
//! everything on the heap by identity. Structural equality lives in [`crate::equality`].

use crate::collections::{IntRange, OrderedMap, Sequence};
use crate::date::TemporalValue;
use crate::object::{Expando, Instance};
use crate::text::{Pattern, StringBuffer};
use grove_config::DEFAULT_DATE_PATTERN;
use indexmap::IndexMap;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Host-native array. Clones share the same storage.
#[derive(Clone, Default)]
pub struct NativeArray(Rc<RefCell<Vec<Value>>>);

impl NativeArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(values: Vec<Value>) -> Self {
        NativeArray(Rc::new(RefCell::new(values)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Borrow the elements without copying
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Snapshot of the current elements
    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<Value> for NativeArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        NativeArray::from_vec(iter.into_iter().collect())
    }
}

/// Host-native keyed bag: string keys in insertion order. Clones share the same storage.
#[derive(Clone, Default)]
pub struct NativeObject(Rc<RefCell<IndexMap<String, Value>>>);

impl NativeObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Insert or overwrite, returning the previous value
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Snapshot of the current entries in insertion order
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for NativeObject {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let map: IndexMap<String, Value> = iter.into_iter().map(|(k, v)| (k.into(), v)).collect();
        NativeObject(Rc::new(RefCell::new(map)))
    }
}

/// Native function type - Rust closure callable from generated code
pub type NativeFn = Rc<dyn Fn(&[Value]) -> RuntimeResult<Value>>;

/// Runtime value type
#[derive(Clone)]
pub enum Value {
    /// Null value (host `null` and `undefined` both map here)
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (IEEE 754 double-precision)
    Number(f64),
    /// String value (reference-counted, immutable)
    String(Rc<String>),
    /// Host-native array
    Array(NativeArray),
    /// Host-native keyed bag
    Object(NativeObject),
    /// Host-native callable
    Function(NativeFn),
    /// Emulated list
    List(Sequence),
    /// Emulated insertion-ordered map
    Map(OrderedMap),
    /// Instance of a user-defined class
    Instance(Instance),
    /// Point in time
    Date(Rc<TemporalValue>),
    /// Inclusive integer range
    Range(Rc<IntRange>),
    /// Mutable string builder
    StringBuffer(StringBuffer),
    /// Compiled regular expression
    Pattern(Pattern),
    /// Open-field dynamic object
    Expando(Expando),
}

impl Value {
    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Rc::new(s.into()))
    }

    /// Create a new host-native array
    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(NativeArray::from_vec(values))
    }

    /// Create a new host-native keyed bag
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(entries.into_iter().collect())
    }

    /// Wrap a Rust closure as a host-native callable
    pub fn function(f: impl Fn(&[Value]) -> RuntimeResult<Value> + 'static) -> Self {
        Value::Function(Rc::new(f))
    }

    /// Create a new emulated list
    pub fn list(values: Vec<Value>) -> Self {
        Value::List(Sequence::from_values(values))
    }

    /// Wrap a temporal value
    pub fn date(date: TemporalValue) -> Self {
        Value::Date(Rc::new(date))
    }

    /// Create an inclusive integer range
    pub fn range(from: i64, to: i64) -> Self {
        Value::Range(Rc::new(IntRange::new(from, to)))
    }

    /// The tag predicate: true iff the value belongs to the emulated object system.
    ///
    /// Every component that needs to tell emulated values from host values asks here.
    pub fn is_emulated(&self) -> bool {
        matches!(
            self,
            Value::List(_)
                | Value::Map(_)
                | Value::Instance(_)
                | Value::Date(_)
                | Value::Range(_)
                | Value::StringBuffer(_)
                | Value::Pattern(_)
                | Value::Expando(_)
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Instance(_) => "instance",
            Value::Date(_) => "date",
            Value::Range(_) => "range",
            Value::StringBuffer(_) => "stringBuffer",
            Value::Pattern(_) => "pattern",
            Value::Expando(_) => "expando",
        }
    }

    /// Name used in error messages: the class name for emulated values,
    /// the host type name otherwise
    pub fn describe_type(&self) -> String {
        match crate::object::class_of(self) {
            Some(descriptor) => descriptor.name().to_string(),
            None => self.type_name().to_string(),
        }
    }

    /// Groovy truth: null, false, zero, empty strings and empty collections are false
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(arr) => !arr.is_empty(),
            Value::Object(obj) => !obj.is_empty(),
            Value::List(seq) => !seq.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::StringBuffer(sb) => sb.size() > 0,
            _ => true,
        }
    }

    /// Host strict equality: scalars by value, heap values by identity
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
            (Value::Date(a), Value::Date(b)) => Rc::ptr_eq(a, b),
            (Value::Range(a), Value::Range(b)) => Rc::ptr_eq(a, b),
            (Value::StringBuffer(a), Value::StringBuffer(b)) => a.ptr_eq(b),
            (Value::Pattern(a), Value::Pattern(b)) => a.ptr_eq(b),
            (Value::Expando(a), Value::Expando(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Free-standing form of [`Value::is_emulated`] for generated call sites
pub fn is_emulated_object(value: &Value) -> bool {
    value.is_emulated()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.identical(other)
    }
}

/// Render a number the way the emulated language prints it
pub(crate) fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}", if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 {
        write!(f, "{:.0}", n)
    } else {
        write!(f, "{}", n)
    }
}

/// A value paired with the date pattern used for every date inside it
struct Rendered<'a> {
    value: &'a Value,
    date_pattern: &'a str,
}

impl Rendered<'_> {
    fn nested<'b>(&'b self, value: &'b Value) -> Rendered<'b> {
        Rendered {
            value,
            date_pattern: self.date_pattern,
        }
    }

    fn write_list(&self, f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.nested(item))?;
        }
        write!(f, "]")
    }

    fn write_entries<K: fmt::Display>(
        &self,
        f: &mut fmt::Formatter<'_>,
        entries: &[(K, Value)],
    ) -> fmt::Result {
        if entries.is_empty() {
            return write!(f, "[:]");
        }
        write!(f, "[")?;
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", key, self.nested(value))?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => format_number(*n, f),
            Value::String(s) => write!(f, "{}", s.as_str()),
            Value::Array(arr) => self.write_list(f, &arr.values()),
            Value::Object(obj) => self.write_entries(f, &obj.entries()),
            Value::Function(_) => write!(f, "<fn>"),
            Value::List(seq) => self.write_list(f, &seq.values()),
            Value::Map(map) => self.write_entries(f, &map.entries()),
            Value::Instance(inst) => {
                write!(f, "{}", inst.descriptor().simple_name())?;
                self.write_entries(f, &inst.fields())
            }
            Value::Date(date) => match date.format(self.date_pattern) {
                Ok(text) => write!(f, "{}", text),
                Err(_) => write!(f, "{}", date),
            },
            Value::Range(range) => write!(f, "{}", range),
            Value::StringBuffer(sb) => write!(f, "{}", sb),
            Value::Pattern(p) => write!(f, "{}", p.source()),
            Value::Expando(e) => {
                write!(f, "{{")?;
                for (i, (key, value)) in e.properties().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, self.nested(value))?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Value {
    /// Display text with every nested date formatted by `date_pattern`.
    ///
    /// A pattern that cannot be compiled falls back to the default date rendering.
    pub fn render(&self, date_pattern: &str) -> String {
        Rendered {
            value: self,
            date_pattern,
        }
        .to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = Rendered {
            value: self,
            date_pattern: DEFAULT_DATE_PATTERN,
        };
        write!(f, "{}", rendered)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s.as_str()),
            Value::Array(arr) => write!(f, "Array({:?})", arr.borrow().as_slice()),
            Value::Object(obj) => write!(f, "Object({:?})", obj.entries()),
            Value::Function(_) => write!(f, "Function(<closure>)"),
            Value::List(seq) => write!(f, "List({:?})", seq.values()),
            Value::Map(map) => write!(f, "Map({:?})", map.entries()),
            Value::Instance(inst) => write!(
                f,
                "Instance({}, {:?})",
                inst.descriptor().name(),
                inst.fields()
            ),
            Value::Date(date) => write!(f, "Date({})", date),
            Value::Range(range) => write!(f, "Range({})", range),
            Value::StringBuffer(sb) => write!(f, "StringBuffer({:?})", sb.to_string()),
            Value::Pattern(p) => write!(f, "Pattern(/{}/)", p.source()),
            Value::Expando(e) => write!(f, "Expando({:?})", e.properties()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::List(seq)
    }
}

impl From<OrderedMap> for Value {
    fn from(map: OrderedMap) -> Self {
        Value::Map(map)
    }
}

impl From<Instance> for Value {
    fn from(inst: Instance) -> Self {
        Value::Instance(inst)
    }
}

impl From<TemporalValue> for Value {
    fn from(date: TemporalValue) -> Self {
        Value::date(date)
    }
}

/// Runtime error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// Method or property access on a null receiver
    #[error("Cannot invoke '{method}' on null object")]
    Invocation { method: String },
    /// Receiver has no member with this name
    #[error("No signature of method: {type_name}.{method}() is applicable")]
    NoSuchMethod { type_name: String, method: String },
    /// Malformed numeric, date or pattern text
    #[error("Format error: {msg}")]
    Format { msg: String },
    /// Operand or argument of the wrong type
    #[error("Type error: {msg}")]
    TypeError { msg: String },
    /// Index outside a collection
    #[error("Index {index} out of range for size {size}")]
    OutOfBounds { index: i64, size: usize },
}

/// Result alias used throughout the runtime
pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-5.0).to_string(), "-5");
        assert_eq!(Value::Number(7.02).to_string(), "7.02");
        assert_eq!(Value::Number(1e21).to_string(), "1000000000000000000000");
    }

    #[test]
    fn test_string_display() {
        assert_eq!(Value::string("hello").to_string(), "hello");
    }

    #[test]
    fn test_container_display() {
        let arr = Value::array(vec![Value::Number(1.0), Value::string("a")]);
        assert_eq!(arr.to_string(), "[1, a]");

        let obj = Value::object([("a", Value::Number(1.0)), ("b", Value::Null)]);
        assert_eq!(obj.to_string(), "[a:1, b:null]");
        assert_eq!(Value::object(Vec::<(String, Value)>::new()).to_string(), "[:]");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Number(42.0).type_name(), "number");
        assert_eq!(Value::string("hi").type_name(), "string");
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::array(vec![]).type_name(), "array");
        assert_eq!(Value::list(vec![]).type_name(), "list");
    }

    #[test]
    fn test_tag_predicate() {
        assert!(Value::list(vec![]).is_emulated());
        assert!(Value::Map(OrderedMap::new()).is_emulated());
        assert!(Value::range(1, 5).is_emulated());
        assert!(Value::date(TemporalValue::now()).is_emulated());
        assert!(!Value::string("").is_emulated());
        assert!(!Value::Number(5.0).is_emulated());
        assert!(!Value::object(Vec::<(String, Value)>::new()).is_emulated());
        assert!(!Value::function(|_| Ok(Value::Null)).is_emulated());
        assert!(!Value::Null.is_emulated());
    }

    #[test]
    fn test_identity_for_heap_values() {
        let a = Value::array(vec![Value::Number(1.0)]);
        let b = Value::array(vec![Value::Number(1.0)]);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a, Value::list(vec![Value::Number(1.0)]));
    }

    #[test]
    fn test_identity_for_scalars() {
        assert_eq!(Value::Number(5.0), Value::from(5));
        assert_eq!(Value::string("x"), Value::from("x"));
        assert_ne!(Value::Null, Value::Number(0.0));
    }

    #[test]
    fn test_native_array_shares_storage() {
        let arr = NativeArray::new();
        let alias = arr.clone();
        alias.push(Value::Number(1.0));
        assert_eq!(arr.len(), 1);
    }

    #[test]
    fn test_native_object_keeps_order() {
        let obj = NativeObject::new();
        obj.insert("z", Value::Number(1.0));
        obj.insert("a", Value::Number(2.0));
        assert_eq!(obj.keys(), vec!["z".to_string(), "a".to_string()]);
        assert_eq!(obj.remove("z"), Some(Value::Number(1.0)));
        assert_eq!(obj.len(), 1);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(Value::Number(2.0).is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(!Value::list(vec![]).is_truthy());
        assert!(Value::list(vec![Value::Null]).is_truthy());
    }

    #[test]
    fn test_runtime_error_messages() {
        let err = RuntimeError::Invocation {
            method: "size".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot invoke 'size' on null object");

        let err = RuntimeError::NoSuchMethod {
            type_name: "java.util.ArrayList".to_string(),
            method: "fly".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No signature of method: java.util.ArrayList.fly() is applicable"
        );
    }
}
