//! Embedding API
//!
//! - `Runtime`: console state for a run of generated code
//! - `ToValue` / `FromValue`: conversion between Rust types and runtime values
//!
//! # Examples
//!
//! ```
//! use grove_runtime::api::{FromValue, Runtime, ToValue};
//!
//! let mut runtime = Runtime::new();
//! runtime.println(&vec![1.0, 2.0].to_value());
//! assert_eq!(runtime.console_data(), "[1, 2]\n");
//!
//! let back: Vec<f64> = FromValue::from_value(&vec![1.0, 2.0].to_value()).unwrap();
//! assert_eq!(back, vec![1.0, 2.0]);
//! ```

pub mod conversion;
pub mod runtime;

pub use conversion::{ConversionError, FromValue, ToValue};
pub use runtime::Runtime;
