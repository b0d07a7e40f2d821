//! Conversion between Rust types and runtime values
//!
//! - `ToValue` - Convert Rust types to `Value`
//! - `FromValue` - Convert `Value` to Rust types
//!
//! Emulated collections are accepted wherever the native form is: a `Vec<T>`
//! can be read from a list or a range, a `HashMap<String, T>` from a map,
//! an expando or an instance.

use crate::value::{NativeObject, Value};
use std::collections::HashMap;
use thiserror::Error;

/// Error type for value conversion failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
    /// Array element type mismatch
    #[error("Array element type mismatch at index {index}: expected {expected}, found {found}")]
    ArrayElementTypeMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    /// Object value type mismatch
    #[error("Object value type mismatch for key '{key}': expected {expected}, found {found}")]
    ObjectValueTypeMismatch {
        key: String,
        expected: String,
        found: String,
    },
}

/// Trait for converting a `Value` to a Rust type
pub trait FromValue: Sized {
    /// # Errors
    ///
    /// Returns `ConversionError` if the value cannot be converted to the target type.
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// Trait for converting a Rust type to a `Value`
pub trait ToValue {
    fn to_value(self) -> Value;
}

fn mismatch(expected: &str, value: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected: expected.to_string(),
        found: value.describe_type(),
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        value.as_number().ok_or_else(|| mismatch("number", value))
    }
}

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Number(self)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Number(n) if n.fract() == 0.0 && n.is_finite() => Ok(*n as i64),
            _ => Err(mismatch("integer", value)),
        }
    }
}

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::Number(self as f64)
    }
}

impl ToValue for i32 {
    fn to_value(self) -> Value {
        Value::Number(self as f64)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(s) => Ok(s.to_string()),
            Value::StringBuffer(sb) => Ok(sb.to_string()),
            _ => Err(mismatch("string", value)),
        }
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::string(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::string(self)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        value.as_bool().ok_or_else(|| mismatch("boolean", value))
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for () {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(()),
            _ => Err(mismatch("null", value)),
        }
    }
}

impl ToValue for () {
    fn to_value(self) -> Value {
        Value::Null
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            _ => Ok(Some(T::from_value(value)?)),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        match self {
            None => Value::Null,
            Some(v) => v.to_value(),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        let items = match value {
            Value::Array(arr) => arr.values(),
            Value::List(seq) => seq.values(),
            Value::Range(range) => range.to_values(),
            _ => return Err(mismatch("array", value)),
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_value(item).map_err(|e| match e {
                    ConversionError::TypeMismatch { expected, found } => {
                        ConversionError::ArrayElementTypeMismatch {
                            index,
                            expected,
                            found,
                        }
                    }
                    other => other,
                })
            })
            .collect()
    }
}

/// Vectors become native arrays
impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(self) -> Value {
        Value::array(self.into_iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        let entries: Vec<(String, Value)> = match value {
            Value::Object(obj) => obj.entries(),
            Value::Map(map) => map
                .entries()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            Value::Expando(expando) => expando.properties(),
            Value::Instance(inst) => inst.fields(),
            _ => return Err(mismatch("object", value)),
        };
        entries
            .into_iter()
            .map(|(key, item)| match T::from_value(&item) {
                Ok(converted) => Ok((key, converted)),
                Err(ConversionError::TypeMismatch { expected, found }) => {
                    Err(ConversionError::ObjectValueTypeMismatch {
                        key,
                        expected,
                        found,
                    })
                }
                Err(e) => Err(e),
            })
            .collect()
    }
}

/// Maps become native keyed bags
impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(self) -> Value {
        Value::Object(
            self.into_iter()
                .map(|(k, v)| (k, v.to_value()))
                .collect::<NativeObject>(),
        )
    }
}
