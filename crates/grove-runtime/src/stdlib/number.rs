//! Number methods

use super::expect_arity;
use crate::operators::{minus, multiply, plus};
use crate::value::{RuntimeResult, Value};

pub(crate) fn call(n: f64, method: &str, args: &[Value]) -> RuntimeResult<Option<Value>> {
    let result = match method {
        "abs" => {
            expect_arity(method, args, 0)?;
            Value::Number(n.abs())
        }
        "intValue" | "toInteger" => {
            expect_arity(method, args, 0)?;
            Value::Number(n.trunc())
        }
        "round" => {
            expect_arity(method, args, 0)?;
            // Java rounds half up, toward positive infinity
            Value::Number((n + 0.5).floor())
        }
        "plus" => {
            expect_arity(method, args, 1)?;
            plus(&Value::Number(n), &args[0])?
        }
        "minus" => {
            expect_arity(method, args, 1)?;
            minus(&Value::Number(n), &args[0])?
        }
        "multiply" => {
            expect_arity(method, args, 1)?;
            multiply(&Value::Number(n), &args[0])?
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        let round = |n: f64| call(n, "round", &[]).unwrap().unwrap();
        assert_eq!(round(2.5), Value::Number(3.0));
        assert_eq!(round(-2.5), Value::Number(-2.0));
        assert_eq!(round(1.2), Value::Number(1.0));
    }

    #[test]
    fn test_int_value_truncates() {
        assert_eq!(
            call(-3.7, "intValue", &[]).unwrap().unwrap(),
            Value::Number(-3.0)
        );
    }

    #[test]
    fn test_plus_delegates_to_operator() {
        assert_eq!(
            call(5.0, "plus", &[Value::string("x")]).unwrap().unwrap(),
            Value::string("5x")
        );
    }
}
