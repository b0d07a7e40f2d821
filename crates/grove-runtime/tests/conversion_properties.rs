//! Property tests for native/emulated conversion and structural equality

mod common;

use common::*;
use common::assert_eq;
use grove_runtime::{equals, is_emulated_object, to_emulated, to_native, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e9f64..1.0e9).prop_map(Value::Number),
        "[a-z]{0,8}".prop_map(Value::string),
    ]
}

fn native_value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..6).prop_map(Value::object),
        ]
    })
}

fn contains_emulated(value: &Value) -> bool {
    match value {
        Value::Array(arr) => arr.values().iter().any(contains_emulated),
        Value::Object(obj) => obj.entries().iter().any(|(_, v)| contains_emulated(v)),
        other => is_emulated_object(other),
    }
}

proptest! {
    #[test]
    fn prop_round_trip_preserves_structure(value in native_value()) {
        let emulated = to_emulated(&value, None);
        let back = to_native(&emulated);
        prop_assert!(equals(&value, &back));
        prop_assert!(equals(&value, &emulated));
        prop_assert!(!contains_emulated(&back));
    }

    #[test]
    fn prop_equality_is_symmetric(a in native_value(), b in native_value()) {
        let ea = to_emulated(&a, None);
        prop_assert_eq!(equals(&ea, &b), equals(&b, &ea));
    }

    #[test]
    fn prop_to_emulated_is_idempotent(value in native_value()) {
        let once = to_emulated(&value, None);
        let twice = to_emulated(&once, None);
        prop_assert_eq!(&once, &twice);
    }
}

#[test]
fn test_round_trip_keeps_key_order() {
    let native = bag(&[("z", num(1.0)), ("a", num(2.0)), ("m", num(3.0))]);
    let Value::Object(back) = to_native(&to_emulated(&native, None)) else {
        panic!("expected keyed bag");
    };
    assert_eq!(back.keys(), vec!["z", "a", "m"]);
}
