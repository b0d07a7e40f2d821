//! Built-in method tables
//!
//! One module per receiver type. Each exposes a `call` function that returns
//! `Ok(None)` when the method name is not in its table, so dispatch can move
//! on to the universal methods.

pub mod datetime;
pub mod list;
pub mod map;
pub mod number;
pub mod string;
pub mod text;

use crate::value::{NativeFn, RuntimeError, RuntimeResult, Value};

/// Check the argument count of a built-in method
pub(crate) fn expect_arity(method: &str, args: &[Value], expected: usize) -> RuntimeResult<()> {
    if args.len() != expected {
        return Err(RuntimeError::TypeError {
            msg: format!(
                "{}() expects {} argument(s), got {}",
                method,
                expected,
                args.len()
            ),
        });
    }
    Ok(())
}

/// Check an argument count range (inclusive)
pub(crate) fn expect_arity_between(
    method: &str,
    args: &[Value],
    min: usize,
    max: usize,
) -> RuntimeResult<()> {
    if args.len() < min || args.len() > max {
        return Err(RuntimeError::TypeError {
            msg: format!(
                "{}() expects {} to {} arguments, got {}",
                method,
                min,
                max,
                args.len()
            ),
        });
    }
    Ok(())
}

pub(crate) fn arg_error(method: &str, expected: &str, actual: &Value) -> RuntimeError {
    RuntimeError::TypeError {
        msg: format!(
            "{}() expects {} argument, got {}",
            method,
            expected,
            actual.describe_type()
        ),
    }
}

pub(crate) fn expect_string<'a>(method: &str, value: &'a Value) -> RuntimeResult<&'a str> {
    match value {
        Value::String(s) => Ok(s.as_str()),
        other => Err(arg_error(method, "string", other)),
    }
}

/// Whole-number argument used as an index
pub(crate) fn expect_index(method: &str, value: &Value) -> RuntimeResult<i64> {
    match value {
        Value::Number(n) if n.fract() == 0.0 && n.is_finite() => Ok(*n as i64),
        other => Err(arg_error(method, "whole number", other)),
    }
}

pub(crate) fn expect_function<'a>(method: &str, value: &'a Value) -> RuntimeResult<&'a NativeFn> {
    match value {
        Value::Function(f) => Ok(f),
        other => Err(arg_error(method, "function", other)),
    }
}
