//! Method dispatch across native and emulated receivers

mod common;

use common::*;
use common::assert_eq;
use grove_runtime::{
    get_property, invoke, minus, set_property, ClassBuilder, Expando, OrderedMap, RuntimeError,
    TemporalValue, Value,
};
use rstest::rstest;

fn call(receiver: &Value, method: &str, args: &[Value]) -> Value {
    invoke(receiver, method, Some(args))
        .unwrap_or_else(|e| panic!("{}.{} failed: {}", receiver.describe_type(), method, e))
}

// ============================================================================
// Built-in tables
// ============================================================================

#[rstest]
#[case("hello", "toUpperCase", "HELLO")]
#[case("HeLLo", "toLowerCase", "hello")]
#[case("  padded ", "trim", "padded")]
#[case("abc", "reverse", "cba")]
#[case("42", "toString", "42")]
fn test_string_methods(#[case] receiver: &str, #[case] method: &str, #[case] expected: &str) {
    let result = call(&Value::string(receiver), method, &[]);
    assert_eq!(result.as_str(), Some(expected));
}

#[rstest]
#[case(-3.0, "abs", 3.0)]
#[case(2.5, "round", 3.0)]
#[case(-3.7, "intValue", -3.0)]
fn test_number_methods(#[case] receiver: f64, #[case] method: &str, #[case] expected: f64) {
    assert_eq!(call(&num(receiver), method, &[]).as_number(), Some(expected));
}

#[rstest]
#[case(Value::list(vec![num(1.0), num(2.0), num(3.0)]))]
#[case(numbers(&[1.0, 2.0, 3.0]))]
#[case(Value::range(1, 3))]
fn test_size_and_contains_across_sequence_kinds(#[case] receiver: Value) {
    assert_eq!(call(&receiver, "size", &[]).as_number(), Some(3.0));
    assert_eq!(call(&receiver, "contains", &[num(2.0)]).as_bool(), Some(true));
    assert_eq!(call(&receiver, "contains", &[num(7.0)]).as_bool(), Some(false));
}

#[test]
fn test_list_mutation_is_shared() {
    let list = Value::list(vec![num(1.0)]);
    let alias = list.clone();
    call(&list, "add", &[num(2.0)]);
    assert_eq!(call(&alias, "size", &[]).as_number(), Some(2.0));
    assert_eq!(call(&alias, "join", &[Value::string("-")]).as_str(), Some("1-2"));
}

#[test]
fn test_map_methods() {
    let map = Value::Map(OrderedMap::new());
    call(&map, "put", &[Value::string("k"), num(1.0)]);
    assert_eq!(call(&map, "containsKey", &[Value::string("k")]).as_bool(), Some(true));
    assert_eq!(call(&map, "get", &[Value::string("k")]).as_number(), Some(1.0));
    assert_eq!(call(&map, "toString", &[]).as_str(), Some("[k:1]"));
}

#[rstest]
#[case("yyyy/MM/dd", "2009/01/01")]
#[case("yyyy/MM/dd", "2009/12/01")]
#[case("dd.MM.yyyy", "01.10.2009")]
fn test_date_methods(#[case] pattern: &str, #[case] text: &str) {
    let date = Value::date(TemporalValue::parse(pattern, text).unwrap());
    assert_eq!(call(&date, "format", &[Value::string(pattern)]).as_str(), Some(text));

    let next = call(&date, "plus", &[num(1.0)]);
    let Value::Date(next) = next else {
        panic!("expected date");
    };
    assert_eq!(next.day(), 2);
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_class_method_wins_over_builtin() {
    let class = ClassBuilder::new("DispatchSized")
        .field("items")
        .method("size", |_, _| Ok(Value::Number(99.0)))
        .build();
    let instance = Value::Instance(class.new_instance());
    assert_eq!(call(&instance, "size", &[]).as_number(), Some(99.0));
}

#[test]
fn test_parent_methods_are_inherited() {
    let parent = ClassBuilder::new("DispatchParent")
        .field("name")
        .method("greet", |this, _| {
            let name = this.get("name").unwrap_or(Value::Null);
            Ok(Value::string(format!("hello {}", name)))
        })
        .build();
    let child = ClassBuilder::new("DispatchChild").extends(&parent).build();

    let instance = Value::Instance(child.new_instance());
    set_property(&instance, "name", Value::string("grove")).unwrap();
    assert_eq!(call(&instance, "greet", &[]).as_str(), Some("hello grove"));
    assert_eq!(call(&instance, "getClassName", &[]).as_str(), Some("DispatchChild"));
}

#[test]
fn test_accessors_and_callable_fields() {
    let class = my_class("DispatchAccessors");
    let instance = Value::Instance(class.new_instance());

    call(&instance, "setA", &[num(5.0)]);
    assert_eq!(call(&instance, "getA", &[]).as_number(), Some(5.0));

    set_property(
        &instance,
        "b",
        Value::function(|args| Ok(Value::Number(args.len() as f64))),
    )
    .unwrap();
    assert_eq!(call(&instance, "b", &[num(1.0), num(2.0)]).as_number(), Some(2.0));
}

#[test]
fn test_expando_properties() {
    let expando = Value::Expando(Expando::new());
    set_property(&expando, "color", Value::string("red")).unwrap();
    assert_eq!(get_property(&expando, "color").unwrap().as_str(), Some("red"));
    assert_eq!(call(&expando, "getColor", &[]).as_str(), Some("red"));
    assert!(get_property(&expando, "missing").unwrap().is_null());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_method_reports_type() {
    let class = my_class("DispatchMissing");
    let instance = Value::Instance(class.new_instance());
    match invoke(&instance, "fly", None) {
        Err(RuntimeError::NoSuchMethod { type_name, method }) => {
            assert_eq!(type_name, "DispatchMissing");
            assert_eq!(method, "fly");
        }
        other => panic!("expected NoSuchMethod, got {:?}", other),
    }
}

#[test]
fn test_setting_property_on_number_fails() {
    let result = set_property(&num(1.0), "x", Value::Null);
    assert!(matches!(result, Err(RuntimeError::TypeError { .. })));
}

#[test]
fn test_equals_is_structural() {
    let list = Value::list(vec![num(1.0), num(2.0)]);
    let result = call(&list, "equals", &[numbers(&[1.0, 2.0])]);
    assert_eq!(result.as_bool(), Some(true));
}

#[test]
fn test_failing_equals_method_reaches_list_callers() {
    let class = ClassBuilder::new("DispatchBrokenEquals")
        .method("equals", |_, _| {
            Err(RuntimeError::Format {
                msg: "cannot compare".to_string(),
            })
        })
        .build();
    let list = Value::list(vec![Value::Instance(class.new_instance())]);
    let other = Value::Instance(class.new_instance());

    for method in ["contains", "indexOf"] {
        let result = invoke(&list, method, Some(&[other.clone()]));
        assert!(
            matches!(result, Err(RuntimeError::Format { .. })),
            "{} swallowed the error",
            method
        );
    }
    let removed = Value::list(vec![other]);
    assert!(matches!(minus(&list, &removed), Err(RuntimeError::Format { .. })));
}

#[test]
fn test_huge_range_equals_short_list() {
    let range = Value::range(0, 10_000_000_000);
    assert_eq!(call(&range, "equals", &[Value::list(vec![num(1.0)])]).as_bool(), Some(false));
}
