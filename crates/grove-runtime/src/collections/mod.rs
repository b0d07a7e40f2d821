//! Emulated collection types
//!
//! Sequence (`java.util.ArrayList`), OrderedMap (`java.util.LinkedHashMap`) and
//! IntRange (`groovy.lang.IntRange`), plus the key wrapper used by OrderedMap.

pub mod hash;
pub mod ordered_map;
pub mod range;
pub mod sequence;

pub use hash::HashKey;
pub use ordered_map::OrderedMap;
pub use range::IntRange;
pub use sequence::Sequence;
