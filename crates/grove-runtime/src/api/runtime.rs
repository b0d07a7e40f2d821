//! Console state for a run of generated code
//!
//! Generated programs print and assert through a `Runtime`. Printed text is
//! captured in a console buffer so a host (or a test) can inspect it.
//!
//! # Examples
//!
//! ```
//! use grove_runtime::api::Runtime;
//! use grove_runtime::Value;
//!
//! let mut runtime = Runtime::new();
//! assert!(!runtime.fails());
//! runtime.println(&Value::string("hello"));
//! assert!(runtime.assert(false, "values differ"));
//! ```

use crate::date::TemporalValue;
use crate::value::{RuntimeResult, Value};
use grove_config::Config;
use tracing::info;

/// Console and assertion state
#[derive(Debug, Clone)]
pub struct Runtime {
    fails: bool,
    console_info: bool,
    console_output: bool,
    console_data: String,
    date_pattern: String,
}

impl Runtime {
    /// Runtime with built-in defaults: capture on, logging off, nothing failed
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Runtime seeded from loaded configuration
    pub fn with_config(config: &Config) -> Self {
        Self {
            fails: false,
            console_info: config.console_info(),
            console_output: config.console_output(),
            console_data: String::new(),
            date_pattern: config.date_pattern().to_string(),
        }
    }

    /// True once any assertion has failed
    pub fn fails(&self) -> bool {
        self.fails
    }

    pub fn console_info(&self) -> bool {
        self.console_info
    }

    pub fn console_output(&self) -> bool {
        self.console_output
    }

    /// Everything printed so far
    pub fn console_data(&self) -> &str {
        &self.console_data
    }

    pub fn set_console_info(&mut self, enabled: bool) {
        self.console_info = enabled;
    }

    pub fn set_console_output(&mut self, enabled: bool) {
        self.console_output = enabled;
    }

    pub fn clear_console(&mut self) {
        self.console_data.clear();
    }

    /// Print a value followed by a newline; dates anywhere inside it use the configured pattern
    pub fn println(&mut self, value: &Value) {
        let text = value.render(&self.date_pattern);
        self.write_line(&text);
    }

    /// Record an assertion. A false condition marks the run as failed and prints `message`.
    ///
    /// Returns the condition so call sites can keep going.
    pub fn assert(&mut self, condition: bool, message: &str) -> bool {
        if !condition {
            self.fails = true;
            self.write_line(&format!("Assert Fails! - {}", message));
        }
        condition
    }

    /// Render a date with the configured default pattern
    ///
    /// # Errors
    /// Returns `RuntimeError::Format` if the configured pattern is unsupported
    pub fn format_date(&self, date: &TemporalValue) -> RuntimeResult<String> {
        date.format(&self.date_pattern)
    }

    pub fn date_pattern(&self) -> &str {
        &self.date_pattern
    }

    fn write_line(&mut self, text: &str) {
        if self.console_info {
            info!(target: "grove::console", "{}", text);
        }
        if self.console_output {
            self.console_data.push_str(text);
            self.console_data.push('\n');
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
