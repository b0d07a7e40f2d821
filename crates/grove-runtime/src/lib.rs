//! Grove Runtime - dynamic-language semantics for generated code
//!
//! This library lets code written against a Groovy-style object model run on
//! a plainer host value model:
//! - Emulated collections with identity (lists, ordered maps, ranges)
//! - A class model with map-seeded construction and descriptor inheritance
//! - Recursive conversion between native and emulated values
//! - Structural equality across both representations
//! - Dynamic method dispatch and operator coercion
//! - Pattern-based date parsing and formatting

/// Grove runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod collections;
pub mod convert;
pub mod date;
pub mod equality;
pub mod json;
pub mod method_dispatch;
pub mod object;
pub mod operators;
pub mod stdlib;
pub mod text;
pub mod value;

// Re-export commonly used types
pub use api::{ConversionError, FromValue, Runtime, ToValue};
pub use collections::{HashKey, IntRange, OrderedMap, Sequence};
pub use convert::{to_emulated, to_native};
pub use date::TemporalValue;
pub use equality::{equals, try_equals};
pub use method_dispatch::{get_property, invoke, set_property};
pub use object::{
    class_of, inherit, BuiltinClass, Class, ClassBuilder, ClassDescriptor, ClassRegistry, Expando,
    Instance,
};
pub use operators::{minus, multiply, plus, to_number};
pub use text::{Pattern, StringBuffer};
pub use value::{
    is_emulated_object, NativeArray, NativeFn, NativeObject, RuntimeError, RuntimeResult, Value,
};
