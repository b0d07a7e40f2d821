//! JSON interchange
//!
//! Parsing yields native values (objects keep their key order). Stringifying
//! accepts native or emulated values; emulated ones go through [`to_native`].

use crate::convert::to_native;
use crate::value::{NativeArray, NativeObject, RuntimeError, RuntimeResult, Value};
use serde_json::{Map, Number};

/// Parse JSON text into native values
///
/// # Errors
/// Returns `RuntimeError::Format` for malformed JSON
pub fn parse(text: &str) -> RuntimeResult<Value> {
    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|e| RuntimeError::Format {
            msg: format!("invalid JSON: {}", e),
        })?;
    Ok(from_json(parsed))
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(from_json).collect::<NativeArray>())
        }
        serde_json::Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect::<NativeObject>(),
        ),
    }
}

/// Serialize a value as compact JSON text
///
/// # Errors
/// Returns `RuntimeError::TypeError` for functions and non-finite numbers
pub fn stringify(value: &Value) -> RuntimeResult<String> {
    let json = to_json(&to_native(value))?;
    serde_json::to_string(&json).map_err(|e| RuntimeError::TypeError {
        msg: format!("cannot serialize value: {}", e),
    })
}

fn to_json(value: &Value) -> RuntimeResult<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Value::Number(json_number(*n)?),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::Array(arr) => serde_json::Value::Array(
            arr.borrow()
                .iter()
                .map(to_json)
                .collect::<RuntimeResult<Vec<_>>>()?,
        ),
        Value::Object(obj) => {
            let mut map = Map::new();
            for (key, item) in obj.entries() {
                map.insert(key, to_json(&item)?);
            }
            serde_json::Value::Object(map)
        }
        other => {
            return Err(RuntimeError::TypeError {
                msg: format!("cannot serialize {} as JSON", other.describe_type()),
            })
        }
    })
}

/// Whole numbers serialize without a fractional part
fn json_number(n: f64) -> RuntimeResult<Number> {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Ok(Number::from(n as i64));
    }
    Number::from_f64(n).ok_or_else(|| RuntimeError::TypeError {
        msg: format!("cannot serialize {} as JSON", n),
    })
}
