//! Operator coercion for generated call sites
//!
//! `plus` follows the rule that adding a string to anything concatenates text.
//! Collections, maps and dates get their Groovy operator meaning.

use crate::collections::Sequence;
use crate::equality::position;
use crate::value::{RuntimeError, RuntimeResult, Value};

fn is_text(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::StringBuffer(_))
}

fn unsupported(op: &str, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::TypeError {
        msg: format!(
            "cannot apply {} to {} and {}",
            op,
            left.describe_type(),
            right.describe_type()
        ),
    }
}

/// Elements of a value usable as a list operand
fn list_items(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::List(seq) => Some(seq.values()),
        Value::Array(arr) => Some(arr.values()),
        Value::Range(range) => Some(range.to_values()),
        _ => None,
    }
}

/// Whole number of days for date arithmetic
fn day_count(n: f64) -> RuntimeResult<i64> {
    if n.fract() != 0.0 || !n.is_finite() {
        return Err(RuntimeError::TypeError {
            msg: format!("date arithmetic needs a whole number of days, got {}", n),
        });
    }
    Ok(n as i64)
}

/// `left + right`
pub fn plus(left: &Value, right: &Value) -> RuntimeResult<Value> {
    if is_text(left) || is_text(right) {
        return Ok(Value::string(format!("{}{}", left, right)));
    }
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::List(_) | Value::Array(_), _) => {
            let result = Sequence::from_values(list_items(left).unwrap_or_default());
            match list_items(right) {
                Some(items) => result.extend(items),
                None => result.extend([right.clone()]),
            }
            Ok(Value::List(result))
        }
        (Value::Map(map), Value::Map(other)) => Ok(Value::Map(map.merged(other))),
        (Value::Map(map), Value::Object(_)) => {
            let other = crate::collections::OrderedMap::from_native(right)?;
            Ok(Value::Map(map.merged(&other)))
        }
        (Value::Date(date), Value::Number(days)) => {
            Ok(Value::date(date.plus_days(day_count(*days)?)?))
        }
        _ => Err(unsupported("plus", left, right)),
    }
}

/// `left - right`
pub fn minus(left: &Value, right: &Value) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        (Value::List(_) | Value::Array(_), _) => {
            let removed = list_items(right).unwrap_or_else(|| vec![right.clone()]);
            let mut kept = Vec::new();
            for item in list_items(left).unwrap_or_default() {
                if position(&removed, &item)?.is_none() {
                    kept.push(item);
                }
            }
            Ok(Value::list(kept))
        }
        (Value::String(s), _) if is_text(right) => {
            Ok(Value::string(s.replacen(&right.to_string(), "", 1)))
        }
        (Value::Date(date), Value::Number(days)) => {
            Ok(Value::date(date.plus_days(day_count(-*days)?)?))
        }
        (Value::Date(a), Value::Date(b)) => Ok(Value::Number(a.days_since(b) as f64)),
        _ => Err(unsupported("minus", left, right)),
    }
}

/// `left * right`
pub fn multiply(left: &Value, right: &Value) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
        (Value::String(s), Value::Number(times)) => {
            Ok(Value::string(s.repeat(repeat_count(*times, s.len())?)))
        }
        (Value::List(_) | Value::Array(_), Value::Number(times)) => {
            let items = list_items(left).unwrap_or_default();
            let count = repeat_count(*times, items.len())?;
            let result = Sequence::new();
            for _ in 0..count {
                result.extend(items.iter().cloned());
            }
            Ok(Value::List(result))
        }
        _ => Err(unsupported("multiply", left, right)),
    }
}

/// Repeat count for `multiply`; `unit` is the length of one copy
fn repeat_count(n: f64, unit: usize) -> RuntimeResult<usize> {
    if n < 0.0 || n.fract() != 0.0 || !n.is_finite() {
        return Err(RuntimeError::TypeError {
            msg: format!("repeat count must be a non-negative whole number, got {}", n),
        });
    }
    if unit == 0 {
        return Ok(0);
    }
    let count = n as usize;
    match unit.checked_mul(count) {
        Some(total) if total <= isize::MAX as usize && (count as f64) == n => Ok(count),
        _ => Err(RuntimeError::TypeError {
            msg: format!("repeat count {} is too large", n),
        }),
    }
}

/// Numeric value of a number or numeric text
///
/// # Errors
/// - `RuntimeError::Format` for text that is not a number
/// - `RuntimeError::TypeError` for any other kind of value
pub fn to_number(value: &Value) -> RuntimeResult<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::String(_) | Value::StringBuffer(_) => {
            let text = value.to_string();
            parse_number(&text).ok_or_else(|| RuntimeError::Format {
                msg: format!("'{}' is not a number", text),
            })
        }
        other => Err(RuntimeError::TypeError {
            msg: format!("cannot convert {} to a number", other.describe_type()),
        }),
    }
}

/// Parse decimal text; surrounding whitespace is ignored.
///
/// Only digits, signs, a decimal point and an exponent are accepted, so
/// `NaN` and `Infinity` spellings are not numbers. Overflow to infinity is rejected too.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let numeric = |b: u8| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E');
    if trimmed.is_empty() || !trimmed.bytes().all(numeric) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
