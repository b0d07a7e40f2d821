//! Dynamic dispatch
//!
//! `invoke` resolves a method name against any receiver, native or emulated:
//! 1. methods declared by an instance's class, walking parent classes
//! 2. callable fields of instances, expandos and native keyed bags
//!    (plus `getX` / `setX` accessors for instance and expando fields)
//! 3. the built-in table for the receiver's type
//! 4. universal methods: `toString`, `equals`, `getClassName`

use crate::equality::try_equals;
use crate::stdlib;
use crate::value::{RuntimeError, RuntimeResult, Value};
use tracing::debug;

/// Invoke `method` on `receiver`. `None` arguments mean zero arguments.
///
/// # Errors
/// - `RuntimeError::Invocation` when the receiver is null
/// - `RuntimeError::NoSuchMethod` when nothing on the receiver answers to `method`
/// - whatever the resolved method itself returns
pub fn invoke(receiver: &Value, method: &str, args: Option<&[Value]>) -> RuntimeResult<Value> {
    let args = args.unwrap_or(&[]);

    if receiver.is_null() {
        debug!(method, "invoke on null receiver");
        return Err(RuntimeError::Invocation {
            method: method.to_string(),
        });
    }

    if let Some(result) = call_member(receiver, method, args)? {
        return Ok(result);
    }
    if let Some(result) = call_builtin(receiver, method, args)? {
        return Ok(result);
    }
    if let Some(result) = call_universal(receiver, method, args)? {
        return Ok(result);
    }

    debug!(receiver = %receiver.describe_type(), method, "no such method");
    Err(RuntimeError::NoSuchMethod {
        type_name: receiver.describe_type(),
        method: method.to_string(),
    })
}

/// Methods and callable fields the receiver carries itself
fn call_member(receiver: &Value, method: &str, args: &[Value]) -> RuntimeResult<Option<Value>> {
    let field = match receiver {
        Value::Instance(inst) => {
            if let Some(body) = inst.class().find_method(method) {
                return body(inst, args).map(Some);
            }
            let get = |name: &str| inst.get(name);
            let set = |name: &str, value| inst.set(name, value);
            if let Some(result) = accessor(method, args, get, set) {
                return Ok(Some(result));
            }
            inst.get(method)
        }
        Value::Expando(expando) => {
            let field = expando.get(method);
            if field.is_none() {
                let get = |name: &str| expando.get(name);
                let set = |name: &str, value| expando.set(name, value);
                if let Some(result) = accessor(method, args, get, set) {
                    return Ok(Some(result));
                }
            }
            field
        }
        Value::Object(obj) => obj.get(method),
        _ => None,
    };

    match field {
        Some(Value::Function(f)) => f(args).map(Some),
        _ => Ok(None),
    }
}

/// `getName()` reads field `name`, `setName(v)` writes it
fn accessor(
    method: &str,
    args: &[Value],
    get: impl Fn(&str) -> Option<Value>,
    set: impl Fn(&str, Value),
) -> Option<Value> {
    let (prefix, rest) = match (method.strip_prefix("get"), method.strip_prefix("set")) {
        (Some(rest), _) => ("get", rest),
        (_, Some(rest)) => ("set", rest),
        _ => return None,
    };
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    let field: String = first.to_lowercase().chain(chars).collect();

    match (prefix, args) {
        ("get", []) => get(&field),
        ("set", [value]) => {
            get(&field)?;
            set(&field, value.clone());
            Some(Value::Null)
        }
        _ => None,
    }
}

fn call_builtin(receiver: &Value, method: &str, args: &[Value]) -> RuntimeResult<Option<Value>> {
    match receiver {
        Value::String(s) => stdlib::string::call(s, method, args),
        Value::Number(n) => stdlib::number::call(*n, method, args),
        Value::List(seq) => stdlib::list::call(seq, method, args),
        Value::Array(arr) => stdlib::list::call_array(arr, method, args),
        Value::Range(range) => stdlib::list::call_range(range, method, args),
        Value::Map(map) => stdlib::map::call(map, method, args),
        Value::Date(date) => stdlib::datetime::call(date, method, args),
        Value::StringBuffer(sb) => stdlib::text::call_buffer(sb, method, args),
        Value::Pattern(p) => stdlib::text::call_pattern(p, method, args),
        Value::Function(f) if method == "call" => f(args).map(Some),
        _ => Ok(None),
    }
}

fn call_universal(receiver: &Value, method: &str, args: &[Value]) -> RuntimeResult<Option<Value>> {
    let result = match (method, args) {
        ("toString", []) => Value::string(receiver.to_string()),
        ("equals", [other]) => Value::Bool(try_equals(receiver, other)?),
        ("getClassName", []) => Value::string(receiver.describe_type()),
        _ => return Ok(None),
    };
    Ok(Some(result))
}

/// Read a property: fields of instances, expandos, maps and keyed bags,
/// plus read-only sizes of strings and collections. Missing properties read as null.
///
/// # Errors
/// Returns `RuntimeError::Invocation` when the receiver is null
pub fn get_property(receiver: &Value, name: &str) -> RuntimeResult<Value> {
    let value = match receiver {
        Value::Null => {
            return Err(RuntimeError::Invocation {
                method: name.to_string(),
            })
        }
        Value::Instance(inst) => inst.get(name),
        Value::Expando(expando) => expando.get(name),
        Value::Map(map) => map.property(name),
        Value::Object(obj) => obj.get(name),
        Value::String(s) if matches!(name, "size" | "length") => {
            Some(Value::Number(s.chars().count() as f64))
        }
        Value::List(seq) if name == "size" => Some(Value::Number(seq.size() as f64)),
        Value::Array(arr) if matches!(name, "size" | "length") => {
            Some(Value::Number(arr.len() as f64))
        }
        Value::Range(range) if name == "size" => Some(Value::Number(range.size() as f64)),
        Value::Date(date) if name == "time" => Some(Value::Number(date.epoch_millis() as f64)),
        _ => None,
    };
    Ok(value.unwrap_or(Value::Null))
}

/// Write a property on an instance, expando, map or keyed bag
///
/// # Errors
/// - `RuntimeError::Invocation` when the receiver is null
/// - `RuntimeError::TypeError` when the receiver has no writable properties
pub fn set_property(receiver: &Value, name: &str, value: Value) -> RuntimeResult<()> {
    match receiver {
        Value::Null => Err(RuntimeError::Invocation {
            method: name.to_string(),
        }),
        Value::Instance(inst) => {
            inst.set(name, value);
            Ok(())
        }
        Value::Expando(expando) => {
            expando.set(name, value);
            Ok(())
        }
        Value::Map(map) => {
            map.put(&Value::string(name), value)?;
            Ok(())
        }
        Value::Object(obj) => {
            obj.insert(name, value);
            Ok(())
        }
        other => Err(RuntimeError::TypeError {
            msg: format!(
                "cannot set property '{}' on {}",
                name,
                other.describe_type()
            ),
        }),
    }
}
