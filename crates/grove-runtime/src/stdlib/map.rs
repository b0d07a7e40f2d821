//! Map methods

use super::expect_arity;
use crate::collections::OrderedMap;
use crate::operators::plus;
use crate::value::{RuntimeResult, Value};

pub(crate) fn call(map: &OrderedMap, method: &str, args: &[Value]) -> RuntimeResult<Option<Value>> {
    let result = match method {
        "size" => {
            expect_arity(method, args, 0)?;
            Value::Number(map.size() as f64)
        }
        "isEmpty" => {
            expect_arity(method, args, 0)?;
            Value::Bool(map.is_empty())
        }
        "add" => {
            expect_arity(method, args, 2)?;
            map.put(&args[0], args[1].clone())?;
            Value::Map(map.clone())
        }
        "put" => {
            expect_arity(method, args, 2)?;
            map.put(&args[0], args[1].clone())?.unwrap_or(Value::Null)
        }
        "get" => {
            expect_arity(method, args, 1)?;
            map.get(&args[0]).unwrap_or(Value::Null)
        }
        "containsKey" => {
            expect_arity(method, args, 1)?;
            Value::Bool(map.contains_key(&args[0]))
        }
        "remove" => {
            expect_arity(method, args, 1)?;
            map.remove(&args[0]).unwrap_or(Value::Null)
        }
        "keySet" => {
            expect_arity(method, args, 0)?;
            Value::list(map.keys())
        }
        "values" => {
            expect_arity(method, args, 0)?;
            Value::list(map.values())
        }
        "plus" => {
            expect_arity(method, args, 1)?;
            plus(&Value::Map(map.clone()), &args[0])?
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(map: &OrderedMap, method: &str, args: &[Value]) -> Value {
        call(map, method, args).unwrap().unwrap()
    }

    #[test]
    fn test_put_and_get() {
        let map = OrderedMap::new();
        assert_eq!(run(&map, "put", &["k".into(), 1.into()]), Value::Null);
        assert_eq!(run(&map, "put", &["k".into(), 2.into()]), Value::Number(1.0));
        assert_eq!(run(&map, "get", &["k".into()]), Value::Number(2.0));
        assert_eq!(run(&map, "get", &["missing".into()]), Value::Null);
    }

    #[test]
    fn test_add_chains() {
        let map = OrderedMap::new();
        let returned = run(&map, "add", &["a".into(), 1.into()]);
        assert_eq!(returned, Value::Map(map.clone()));
    }

    #[test]
    fn test_key_set_and_values() {
        let map = OrderedMap::new().add("x", 1).and_then(|m| m.add("y", 2)).unwrap();
        assert_eq!(run(&map, "keySet", &[]).to_string(), "[x, y]");
        assert_eq!(run(&map, "values", &[]).to_string(), "[1, 2]");
    }

    #[test]
    fn test_unhashable_key_fails() {
        let map = OrderedMap::new();
        assert!(call(&map, "put", &[Value::list(vec![]), Value::Null]).is_err());
    }
}
