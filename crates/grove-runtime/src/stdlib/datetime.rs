//! Date methods

use super::{expect_arity, expect_string};
use crate::date::TemporalValue;
use crate::operators::{minus, plus};
use crate::value::{RuntimeResult, Value};

pub(crate) fn call(
    date: &TemporalValue,
    method: &str,
    args: &[Value],
) -> RuntimeResult<Option<Value>> {
    let result = match method {
        "format" => {
            expect_arity(method, args, 1)?;
            Value::string(date.format(expect_string(method, &args[0])?)?)
        }
        "parse" => {
            expect_arity(method, args, 2)?;
            let pattern = expect_string(method, &args[0])?;
            let text = expect_string(method, &args[1])?;
            Value::date(TemporalValue::parse(pattern, text)?)
        }
        "getTime" => {
            expect_arity(method, args, 0)?;
            Value::Number(date.epoch_millis() as f64)
        }
        "plus" => {
            expect_arity(method, args, 1)?;
            plus(&Value::date(*date), &args[0])?
        }
        "minus" => {
            expect_arity(method, args, 1)?;
            minus(&Value::date(*date), &args[0])?
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}
