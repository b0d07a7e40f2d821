//! String methods

use super::{expect_arity, expect_arity_between, expect_string};
use crate::collections::Sequence;
use crate::operators::{minus, multiply, parse_number, plus, to_number};
use crate::text::Pattern;
use crate::value::{RuntimeError, RuntimeResult, Value};

/// Call a built-in method on a string receiver
pub(crate) fn call(s: &str, method: &str, args: &[Value]) -> RuntimeResult<Option<Value>> {
    let result = match method {
        "isNumber" => {
            expect_arity(method, args, 0)?;
            Value::Bool(parse_number(s).is_some())
        }
        "size" | "length" => {
            expect_arity(method, args, 0)?;
            Value::Number(s.chars().count() as f64)
        }
        "toUpperCase" => {
            expect_arity(method, args, 0)?;
            Value::string(s.to_uppercase())
        }
        "toLowerCase" => {
            expect_arity(method, args, 0)?;
            Value::string(s.to_lowercase())
        }
        "trim" => {
            expect_arity(method, args, 0)?;
            Value::string(s.trim())
        }
        "contains" => {
            expect_arity(method, args, 1)?;
            Value::Bool(s.contains(expect_string(method, &args[0])?))
        }
        "startsWith" => {
            expect_arity(method, args, 1)?;
            Value::Bool(s.starts_with(expect_string(method, &args[0])?))
        }
        "endsWith" => {
            expect_arity(method, args, 1)?;
            Value::Bool(s.ends_with(expect_string(method, &args[0])?))
        }
        "reverse" => {
            expect_arity(method, args, 0)?;
            Value::string(s.chars().rev().collect::<String>())
        }
        "toInteger" => {
            expect_arity(method, args, 0)?;
            let n = s.trim().parse::<i64>().map_err(|_| RuntimeError::Format {
                msg: format!("'{}' is not an integer", s),
            })?;
            Value::Number(n as f64)
        }
        "toDouble" | "toNumber" => {
            expect_arity(method, args, 0)?;
            Value::Number(to_number(&Value::string(s))?)
        }
        "split" => {
            expect_arity_between(method, args, 0, 1)?;
            let pieces: Vec<String> = match args.first() {
                None => s.split_whitespace().map(str::to_string).collect(),
                Some(sep) => Pattern::new(expect_string(method, sep)?)?.split(s),
            };
            Value::List(pieces.into_iter().map(Value::string).collect::<Sequence>())
        }
        "plus" => {
            expect_arity(method, args, 1)?;
            plus(&Value::string(s), &args[0])?
        }
        "minus" => {
            expect_arity(method, args, 1)?;
            minus(&Value::string(s), &args[0])?
        }
        "multiply" => {
            expect_arity(method, args, 1)?;
            multiply(&Value::string(s), &args[0])?
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}
