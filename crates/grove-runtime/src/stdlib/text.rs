//! StringBuffer and Pattern methods

use super::{expect_arity, expect_string};
use crate::text::{Pattern, StringBuffer};
use crate::value::{RuntimeResult, Value};

pub(crate) fn call_buffer(
    sb: &StringBuffer,
    method: &str,
    args: &[Value],
) -> RuntimeResult<Option<Value>> {
    let result = match method {
        "append" | "leftShift" => {
            expect_arity(method, args, 1)?;
            Value::StringBuffer(sb.append(&args[0]))
        }
        "size" | "length" => {
            expect_arity(method, args, 0)?;
            Value::Number(sb.size() as f64)
        }
        "toString" => {
            expect_arity(method, args, 0)?;
            Value::string(sb.to_string())
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}

pub(crate) fn call_pattern(
    pattern: &Pattern,
    method: &str,
    args: &[Value],
) -> RuntimeResult<Option<Value>> {
    let result = match method {
        "matches" => {
            expect_arity(method, args, 1)?;
            Value::Bool(pattern.matches(expect_string(method, &args[0])?))
        }
        "find" => {
            expect_arity(method, args, 1)?;
            pattern
                .find(expect_string(method, &args[0])?)
                .map_or(Value::Null, Value::string)
        }
        "findAll" => {
            expect_arity(method, args, 1)?;
            let found = pattern.find_all(expect_string(method, &args[0])?);
            Value::list(found.into_iter().map(Value::string).collect())
        }
        "split" => {
            expect_arity(method, args, 1)?;
            let pieces = pattern.split(expect_string(method, &args[0])?);
            Value::list(pieces.into_iter().map(Value::string).collect())
        }
        "pattern" | "toString" => {
            expect_arity(method, args, 0)?;
            Value::string(pattern.source())
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}
