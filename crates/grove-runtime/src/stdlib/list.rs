//! List, native array and range methods

use super::{
    expect_arity, expect_arity_between, expect_function, expect_index, expect_string,
};
use crate::collections::{IntRange, Sequence};
use crate::operators::{minus, plus};
use crate::value::{NativeArray, RuntimeError, RuntimeResult, Value};

fn empty_list(method: &str) -> RuntimeError {
    RuntimeError::TypeError {
        msg: format!("cannot access {}() element from an empty list", method),
    }
}

/// Position inside `size`, counting negative indexes from the end
fn resolve_index(index: i64, size: usize) -> RuntimeResult<usize> {
    let resolved = if index < 0 { size as i64 + index } else { index };
    if resolved < 0 || resolved >= size as i64 {
        return Err(RuntimeError::OutOfBounds { index, size });
    }
    Ok(resolved as usize)
}

pub(crate) fn call(seq: &Sequence, method: &str, args: &[Value]) -> RuntimeResult<Option<Value>> {
    let result = match method {
        "size" => {
            expect_arity(method, args, 0)?;
            Value::Number(seq.size() as f64)
        }
        "isEmpty" => {
            expect_arity(method, args, 0)?;
            Value::Bool(seq.is_empty())
        }
        "add" => {
            expect_arity_between(method, args, 1, 2)?;
            if let [index, value] = args {
                let index = expect_index(method, index)?;
                let position = usize::try_from(index)
                    .map_err(|_| RuntimeError::OutOfBounds { index, size: seq.size() })?;
                seq.insert(position, value.clone())?;
            } else {
                seq.add(args[0].clone());
            }
            Value::List(seq.clone())
        }
        "get" => {
            expect_arity(method, args, 1)?;
            let index = resolve_index(expect_index(method, &args[0])?, seq.size())?;
            seq.get(index as i64).unwrap_or(Value::Null)
        }
        "getAt" => {
            expect_arity(method, args, 1)?;
            seq.get(expect_index(method, &args[0])?).unwrap_or(Value::Null)
        }
        "contains" => {
            expect_arity(method, args, 1)?;
            Value::Bool(seq.contains(&args[0])?)
        }
        "indexOf" => {
            expect_arity(method, args, 1)?;
            Value::Number(seq.index_of(&args[0])?.map_or(-1.0, |i| i as f64))
        }
        "first" => {
            expect_arity(method, args, 0)?;
            seq.first().ok_or_else(|| empty_list(method))?
        }
        "last" => {
            expect_arity(method, args, 0)?;
            seq.last().ok_or_else(|| empty_list(method))?
        }
        "join" => {
            expect_arity_between(method, args, 0, 1)?;
            let separator = match args.first() {
                Some(sep) => expect_string(method, sep)?,
                None => "",
            };
            Value::string(seq.join(separator))
        }
        "remove" => {
            expect_arity(method, args, 1)?;
            let index = resolve_index(expect_index(method, &args[0])?, seq.size())?;
            seq.remove_at(index)?
        }
        "reverse" => {
            expect_arity(method, args, 0)?;
            Value::List(seq.reversed())
        }
        "each" => {
            expect_arity(method, args, 1)?;
            let f = expect_function(method, &args[0])?;
            for item in seq.values() {
                f(&[item])?;
            }
            Value::List(seq.clone())
        }
        "collect" => {
            expect_arity(method, args, 1)?;
            let f = expect_function(method, &args[0])?;
            let mapped = seq
                .values()
                .into_iter()
                .map(|item| f(&[item]))
                .collect::<RuntimeResult<Vec<_>>>()?;
            Value::list(mapped)
        }
        "plus" => {
            expect_arity(method, args, 1)?;
            plus(&Value::List(seq.clone()), &args[0])?
        }
        "minus" => {
            expect_arity(method, args, 1)?;
            minus(&Value::List(seq.clone()), &args[0])?
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}

/// Host arrays only answer the read-only part of the list table
pub(crate) fn call_array(
    arr: &NativeArray,
    method: &str,
    args: &[Value],
) -> RuntimeResult<Option<Value>> {
    match method {
        "length" => call(&Sequence::from_values(arr.values()), "size", args),
        "size" | "get" | "getAt" | "contains" | "indexOf" | "isEmpty" | "join" => {
            call(&Sequence::from_values(arr.values()), method, args)
        }
        _ => Ok(None),
    }
}

pub(crate) fn call_range(
    range: &IntRange,
    method: &str,
    args: &[Value],
) -> RuntimeResult<Option<Value>> {
    let result = match method {
        "size" => {
            expect_arity(method, args, 0)?;
            Value::Number(range.size() as f64)
        }
        "contains" => {
            expect_arity(method, args, 1)?;
            Value::Bool(matches!(args[0], Value::Number(n) if range.contains(n)))
        }
        "getFrom" => {
            expect_arity(method, args, 0)?;
            Value::Number(range.from() as f64)
        }
        "getTo" => {
            expect_arity(method, args, 0)?;
            Value::Number(range.to() as f64)
        }
        "get" => {
            expect_arity(method, args, 1)?;
            let index = resolve_index(expect_index(method, &args[0])?, range.size())?;
            range
                .get(index)
                .map_or(Value::Null, |n| Value::Number(n as f64))
        }
        "toList" => {
            expect_arity(method, args, 0)?;
            Value::list(range.to_values())
        }
        "each" | "collect" | "join" => {
            return call(&Sequence::from_values(range.to_values()), method, args)
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn list(values: &[f64]) -> Sequence {
        values.iter().map(|n| Value::Number(*n)).collect()
    }

    fn run(seq: &Sequence, method: &str, args: &[Value]) -> RuntimeResult<Value> {
        call(seq, method, args).map(|r| r.unwrap_or(Value::Null))
    }

    #[test]
    fn test_add_returns_the_list() {
        let seq = list(&[1.0]);
        let result = run(&seq, "add", &[Value::Number(2.0)]).unwrap();
        assert_eq!(result, Value::List(seq.clone()));
        run(&seq, "add", &[Value::Number(0.0), Value::Number(0.5)]).unwrap();
        assert_eq!(seq.join(","), "0.5,1,2");
    }

    #[test]
    fn test_get_vs_get_at() {
        let seq = list(&[1.0, 2.0]);
        assert_eq!(run(&seq, "get", &[Value::Number(-1.0)]).unwrap(), Value::Number(2.0));
        assert!(matches!(
            run(&seq, "get", &[Value::Number(5.0)]),
            Err(RuntimeError::OutOfBounds { index: 5, size: 2 })
        ));
        assert_eq!(run(&seq, "getAt", &[Value::Number(5.0)]).unwrap(), Value::Null);
    }

    #[test]
    fn test_first_on_empty_list_fails() {
        assert!(run(&Sequence::new(), "first", &[]).is_err());
        assert_eq!(run(&list(&[4.0]), "last", &[]).unwrap(), Value::Number(4.0));
    }

    #[test]
    fn test_each_and_collect() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let each = Value::function(move |args| {
            sink.borrow_mut().push(args[0].to_string());
            Ok(Value::Null)
        });
        run(&list(&[1.0, 2.0]), "each", &[each]).unwrap();
        assert_eq!(*seen.borrow(), vec!["1".to_string(), "2".to_string()]);

        let double = Value::function(|args| match &args[0] {
            Value::Number(n) => Ok(Value::Number(n * 2.0)),
            _ => Ok(Value::Null),
        });
        let doubled = run(&list(&[1.0, 2.0]), "collect", &[double]).unwrap();
        assert_eq!(doubled.to_string(), "[2, 4]");
    }

    #[test]
    fn test_remove_by_index() {
        let seq = list(&[1.0, 2.0, 3.0]);
        assert_eq!(run(&seq, "remove", &[Value::Number(1.0)]).unwrap(), Value::Number(2.0));
        assert_eq!(seq.size(), 2);
    }

    #[test]
    fn test_array_table_is_read_only() {
        let arr = NativeArray::from_vec(vec![Value::Number(1.0)]);
        assert_eq!(
            call_array(&arr, "size", &[]).unwrap(),
            Some(Value::Number(1.0))
        );
        assert!(call_array(&arr, "add", &[Value::Null]).unwrap().is_none());
    }

    #[test]
    fn test_range_methods() {
        let range = IntRange::new(5, 3);
        assert_eq!(
            call_range(&range, "toList", &[]).unwrap().unwrap().to_string(),
            "[5, 4, 3]"
        );
        assert_eq!(
            call_range(&range, "contains", &[Value::Number(4.0)]).unwrap(),
            Some(Value::Bool(true))
        );
        assert_eq!(
            call_range(&range, "getTo", &[]).unwrap(),
            Some(Value::Number(3.0))
        );
    }
}
