//! Map keys
//!
//! Only scalar values (number, string, bool, null) can key an OrderedMap.

use crate::value::{format_number, RuntimeError, RuntimeResult, Value};
use ordered_float::OrderedFloat;
use std::fmt;
use std::rc::Rc;

/// Wrapper type for values that can key an OrderedMap
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    /// Number value with NaN and signed-zero canonicalization
    Number(OrderedFloat<f64>),
    /// String value (reference-counted)
    String(Rc<String>),
    /// Boolean value
    Bool(bool),
    /// Null value
    Null,
}

impl HashKey {
    /// Create a key from a value
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeError` if the value is not a scalar
    pub fn from_value(value: &Value) -> RuntimeResult<Self> {
        match value {
            Value::Number(n) => Ok(HashKey::number(*n)),
            Value::String(s) => Ok(HashKey::String(Rc::clone(s))),
            Value::StringBuffer(sb) => Ok(HashKey::string(sb.to_string())),
            Value::Bool(b) => Ok(HashKey::Bool(*b)),
            Value::Null => Ok(HashKey::Null),
            _ => Err(RuntimeError::TypeError {
                msg: format!("cannot use {} as a map key", value.describe_type()),
            }),
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        HashKey::String(Rc::new(s.into()))
    }

    pub fn number(n: f64) -> Self {
        let normalized = if n.is_nan() {
            f64::NAN
        } else if n == 0.0 {
            0.0
        } else {
            n
        };
        HashKey::Number(OrderedFloat(normalized))
    }

    /// Convert the key back to a value
    pub fn to_value(&self) -> Value {
        match self {
            HashKey::Number(n) => Value::Number(n.0),
            HashKey::String(s) => Value::String(Rc::clone(s)),
            HashKey::Bool(b) => Value::Bool(*b),
            HashKey::Null => Value::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HashKey::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Number(n) => format_number(n.0, f),
            HashKey::String(s) => write!(f, "{}", s.as_str()),
            HashKey::Bool(b) => write!(f, "{}", b),
            HashKey::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for HashKey {
    fn from(s: &str) -> Self {
        HashKey::string(s)
    }
}
