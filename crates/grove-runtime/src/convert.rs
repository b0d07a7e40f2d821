//! Conversion between native and emulated values
//!
//! Both directions are recursive and depth-first. Conversion is permissive:
//! shapes it does not recognise pass through unchanged instead of failing.

use crate::collections::{HashKey, OrderedMap, Sequence};
use crate::object::Class;
use crate::value::{NativeArray, NativeObject, Value};
use std::rc::Rc;
use tracing::trace;

/// Convert a value, and everything reachable from it, to native-only form.
///
/// - List and Range become native arrays
/// - Map, Instance and Expando become native keyed bags
/// - Date becomes epoch milliseconds
/// - StringBuffer becomes its text, Pattern its source
///
/// Native containers are rebuilt so emulated values nested inside them are converted too.
pub fn to_native(value: &Value) -> Value {
    match value {
        Value::List(seq) => native_array(seq.borrow().iter()),
        Value::Array(arr) => native_array(arr.borrow().iter()),
        Value::Range(range) => Value::array(range.to_values()),
        Value::Map(map) => native_object(
            map.entries()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v)),
        ),
        Value::Object(obj) => native_object(obj.entries()),
        Value::Instance(inst) => native_object(inst.fields()),
        Value::Expando(expando) => native_object(expando.properties()),
        Value::Date(date) => Value::Number(date.epoch_millis() as f64),
        Value::StringBuffer(sb) => Value::string(sb.to_string()),
        Value::Pattern(p) => Value::string(p.source()),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Function(_) => {
            value.clone()
        }
    }
}

fn native_array<'a>(items: impl Iterator<Item = &'a Value>) -> Value {
    Value::Array(items.map(to_native).collect::<NativeArray>())
}

fn native_object(entries: impl IntoIterator<Item = (String, Value)>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k, to_native(&v)))
            .collect::<NativeObject>(),
    )
}

/// Convert a native value to its emulated equivalent.
///
/// - Native arrays become lists; `class` applies to each element, not the list
/// - Native keyed bags become instances of `class`, or maps when `class` is `None`
/// - Values inside a keyed bag convert without a class, unless the class
///   declares a typed field for that key
/// - Already-emulated values and scalars pass through unchanged
pub fn to_emulated(value: &Value, class: Option<&Rc<Class>>) -> Value {
    match value {
        Value::Array(arr) => {
            trace!(len = arr.len(), class = ?class.map(|c| c.name()), "converting native array");
            Value::List(
                arr.borrow()
                    .iter()
                    .map(|item| to_emulated(item, class))
                    .collect::<Sequence>(),
            )
        }
        Value::Object(obj) => match class {
            Some(class) => {
                trace!(class = class.name(), "seeding instance from native object");
                Value::Instance(class.instantiate_from(obj))
            }
            None => Value::Map(OrderedMap::from_entries(
                obj.entries()
                    .into_iter()
                    .map(|(k, v)| (HashKey::string(k), to_emulated(&v, None))),
            )),
        },
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::TemporalValue;
    use crate::equality::equals;
    use crate::object::{class_of, ClassBuilder};

    #[test]
    fn test_array_becomes_list() {
        let native = Value::array(vec![Value::Number(1.0), Value::string("a")]);
        let emulated = to_emulated(&native, None);
        assert!(matches!(emulated, Value::List(ref seq) if seq.size() == 2));
        assert!(equals(&native, &emulated));
        assert_ne!(native, emulated);
    }

    #[test]
    fn test_object_becomes_linked_hash_map() {
        let native = Value::object([("a", Value::Number(1.0))]);
        let emulated = to_emulated(&native, None);
        assert_eq!(
            class_of(&emulated).unwrap().name(),
            "java.util.LinkedHashMap"
        );
    }

    #[test]
    fn test_nested_bags_convert_without_class() {
        let class = ClassBuilder::new("ConvertTestOuter").build();
        let native = Value::object([("inner", Value::object([("x", Value::Number(1.0))]))]);
        match to_emulated(&native, Some(&class)) {
            Value::Instance(inst) => {
                let inner = inst.get("inner").unwrap();
                assert_eq!(class_of(&inner).unwrap().name(), "java.util.LinkedHashMap");
            }
            other => panic!("expected instance, got {:?}", other),
        }
    }

    #[test]
    fn test_class_propagates_through_nested_arrays() {
        let class = ClassBuilder::new("ConvertTestDeep").build();
        let native = Value::array(vec![Value::array(vec![Value::object([(
            "a",
            Value::Number(1.0),
        )])])]);
        let emulated = to_emulated(&native, Some(&class));
        let inner = match emulated {
            Value::List(outer) => outer.get(0).unwrap(),
            other => panic!("expected list, got {:?}", other),
        };
        let element = match inner {
            Value::List(inner) => inner.get(0).unwrap(),
            other => panic!("expected list, got {:?}", other),
        };
        assert_eq!(class_of(&element).unwrap().name(), "ConvertTestDeep");
    }

    #[test]
    fn test_emulated_input_passes_through() {
        let list = Value::list(vec![Value::Number(1.0)]);
        assert_eq!(to_emulated(&list, None), list);
    }

    #[test]
    fn test_to_native_special_types() {
        let date = TemporalValue::from_epoch_millis(86_400_000).unwrap();
        assert_eq!(to_native(&Value::date(date)), Value::Number(86_400_000.0));
        assert_eq!(
            to_native(&Value::range(1, 3)).to_string(),
            Value::array(vec![1.into(), 2.into(), 3.into()]).to_string()
        );
    }

    #[test]
    fn test_to_native_scalars_unchanged() {
        assert_eq!(to_native(&Value::Null), Value::Null);
        assert_eq!(to_native(&Value::string("s")), Value::string("s"));
    }

    #[test]
    fn test_to_native_instance_fields() {
        let class = ClassBuilder::new("ConvertTestNative").field("n").build();
        let inst = class.new_instance();
        inst.set("n", Value::list(vec![Value::Number(2.0)]));
        match to_native(&Value::Instance(inst)) {
            Value::Object(obj) => assert!(matches!(obj.get("n"), Some(Value::Array(_)))),
            other => panic!("expected native object, got {:?}", other),
        }
    }
}
