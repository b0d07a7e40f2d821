//! Emulated object model
//!
//! Class descriptors form an acyclic graph rooted at `java.lang.Object`.
//! A [`Class`] is the factory for [`Instance`]s; the [`ClassRegistry`] maps
//! class names to factories for the current thread.

pub mod class;
pub mod expando;
pub mod instance;
pub mod registry;

pub use class::{inherit, Class, ClassBuilder, ClassDescriptor, Method};
pub use expando::Expando;
pub use instance::Instance;
pub use registry::{BuiltinClass, ClassRegistry};

use crate::value::Value;
use std::rc::Rc;

/// Descriptor of a tagged value; `None` for native values
pub fn class_of(value: &Value) -> Option<Rc<ClassDescriptor>> {
    if !value.is_emulated() {
        return None;
    }
    let builtin = match value {
        Value::Instance(inst) => return Some(Rc::clone(inst.descriptor())),
        Value::List(_) => BuiltinClass::List,
        Value::Map(_) => BuiltinClass::Map,
        Value::Date(_) => BuiltinClass::Date,
        Value::Range(_) => BuiltinClass::Range,
        Value::StringBuffer(_) => BuiltinClass::StringBuffer,
        Value::Pattern(_) => BuiltinClass::Pattern,
        Value::Expando(_) => BuiltinClass::Expando,
        _ => return None,
    };
    Some(builtin.descriptor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::OrderedMap;

    #[test]
    fn test_class_of_builtins() {
        let descriptor = class_of(&Value::list(vec![])).unwrap();
        assert_eq!(descriptor.name(), "java.util.ArrayList");
        assert_eq!(descriptor.simple_name(), "ArrayList");
        assert_eq!(
            class_of(&Value::Map(OrderedMap::new())).unwrap().name(),
            "java.util.LinkedHashMap"
        );
        assert_eq!(
            class_of(&Value::range(1, 2))
                .unwrap()
                .superclass()
                .map(|s| s.name().to_string()),
            Some("java.lang.Object".to_string())
        );
    }

    #[test]
    fn test_class_of_native_is_none() {
        assert!(class_of(&Value::array(vec![])).is_none());
        assert!(class_of(&Value::string("x")).is_none());
        assert!(class_of(&Value::Null).is_none());
    }
}
