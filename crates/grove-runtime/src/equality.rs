//! Structural equality
//!
//! Native and emulated containers holding equal elements are equal to each
//! other. Instances of user classes are the exception: they only equal other
//! instances, never a keyed bag or map with the same contents.

use crate::collections::HashKey;
use crate::object::Instance;
use crate::value::{RuntimeResult, Value};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::warn;

/// Deep structural equality for callers that have no error channel.
///
/// A failing user-defined `equals` method counts as "not equal" here. Runtime
/// operations use [`try_equals`] so the failure reaches the caller.
pub fn equals(a: &Value, b: &Value) -> bool {
    match try_equals(a, b) {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "equals method failed, treating values as unequal");
            false
        }
    }
}

/// Deep structural equality, propagating errors from user-defined `equals` methods
pub fn try_equals(a: &Value, b: &Value) -> RuntimeResult<bool> {
    let result = match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,

        (Value::StringBuffer(sb), Value::String(s))
        | (Value::String(s), Value::StringBuffer(sb)) => sb.to_string() == **s,
        (Value::StringBuffer(x), Value::StringBuffer(y)) => {
            x.ptr_eq(y) || x.to_string() == y.to_string()
        }

        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Pattern(x), Value::Pattern(y)) => x.source() == y.source(),
        (Value::Function(f), Value::Function(g)) => Rc::ptr_eq(f, g),

        (Value::Instance(x), Value::Instance(y)) => return instance_equals(x, y),
        (Value::Instance(_), _) | (_, Value::Instance(_)) => false,

        (Value::Range(x), Value::Range(y)) => x == y,

        _ => {
            if let (Some(x_len), Some(y_len)) = (sequence_len(a), sequence_len(b)) {
                if x_len != y_len {
                    return Ok(false);
                }
            }
            if let (Some(xs), Some(ys)) = (sequence_items(a), sequence_items(b)) {
                return sequences_equal(&xs, &ys);
            }
            if let (Some(mut xs), Some(mut ys)) = (map_entries(a), map_entries(b)) {
                if has_textual_keys(a) || has_textual_keys(b) {
                    xs = textual_keys(xs);
                    ys = textual_keys(ys);
                }
                return maps_equal(&xs, &ys);
            }
            false
        }
    };
    Ok(result)
}

/// Index of the first element structurally equal to `value`
pub(crate) fn position(items: &[Value], value: &Value) -> RuntimeResult<Option<usize>> {
    for (index, item) in items.iter().enumerate() {
        if try_equals(item, value)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

fn sequence_len(value: &Value) -> Option<usize> {
    match value {
        Value::Array(arr) => Some(arr.len()),
        Value::List(seq) => Some(seq.size()),
        Value::Range(range) => Some(range.size()),
        _ => None,
    }
}

/// Elements of sequence-like values (native arrays, lists, ranges)
fn sequence_items(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(arr) => Some(arr.values()),
        Value::List(seq) => Some(seq.values()),
        Value::Range(range) => Some(range.to_values()),
        _ => None,
    }
}

/// Entries of map-like values (native keyed bags, maps, expandos)
fn map_entries(value: &Value) -> Option<Vec<(HashKey, Value)>> {
    match value {
        Value::Object(obj) => Some(
            obj.entries()
                .into_iter()
                .map(|(k, v)| (HashKey::string(k), v))
                .collect(),
        ),
        Value::Map(map) => Some(map.entries()),
        Value::Expando(expando) => Some(
            expando
                .properties()
                .into_iter()
                .map(|(k, v)| (HashKey::string(k), v))
                .collect(),
        ),
        _ => None,
    }
}

/// Keyed bags and expandos only have string keys, so a map compared against
/// them is matched by the text of its keys.
fn has_textual_keys(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Expando(_))
}

fn textual_keys(entries: Vec<(HashKey, Value)>) -> Vec<(HashKey, Value)> {
    entries
        .into_iter()
        .map(|(k, v)| match k {
            HashKey::String(_) => (k, v),
            other => (HashKey::string(other.to_string()), v),
        })
        .collect()
}

fn sequences_equal(xs: &[Value], ys: &[Value]) -> RuntimeResult<bool> {
    if xs.len() != ys.len() {
        return Ok(false);
    }
    for (x, y) in xs.iter().zip(ys) {
        if !try_equals(x, y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn maps_equal(xs: &[(HashKey, Value)], ys: &[(HashKey, Value)]) -> RuntimeResult<bool> {
    if xs.len() != ys.len() {
        return Ok(false);
    }
    let lookup: HashMap<&HashKey, &Value> = ys.iter().map(|(k, v)| (k, v)).collect();
    for (key, x) in xs {
        match lookup.get(key) {
            Some(y) if try_equals(x, y)? => {}
            _ => return Ok(false),
        }
    }
    Ok(true)
}

fn instance_equals(x: &Instance, y: &Instance) -> RuntimeResult<bool> {
    if x.ptr_eq(y) {
        return Ok(true);
    }
    if let Some(method) = x.class().find_method("equals") {
        let result = method(x, &[Value::Instance(y.clone())])?;
        return Ok(result.is_truthy());
    }
    if x.descriptor().name() != y.descriptor().name() {
        return Ok(false);
    }
    let xs: Vec<(HashKey, Value)> = x
        .fields()
        .into_iter()
        .map(|(k, v)| (HashKey::string(k), v))
        .collect();
    let ys: Vec<(HashKey, Value)> = y
        .fields()
        .into_iter()
        .map(|(k, v)| (HashKey::string(k), v))
        .collect();
    maps_equal(&xs, &ys)
}
