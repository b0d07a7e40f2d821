//! Text types: StringBuffer (`java.lang.StringBuffer`) and Pattern (`java.util.regex.Pattern`)

use crate::value::{RuntimeError, RuntimeResult, Value};
use regex::Regex;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Mutable string builder. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct StringBuffer {
    inner: Rc<RefCell<String>>,
}

impl StringBuffer {
    pub fn new(initial: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(initial.to_string())),
        }
    }

    /// Append the textual rendering of a value, returning the same buffer
    pub fn append(&self, value: &Value) -> Self {
        let text = value.to_string();
        self.inner.borrow_mut().push_str(&text);
        self.clone()
    }

    /// Size in characters
    pub fn size(&self) -> usize {
        self.inner.borrow().chars().count()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for StringBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.borrow())
    }
}

#[derive(Debug)]
struct CompiledPattern {
    source: String,
    regex: Regex,
    whole: Regex,
}

/// Compiled regular expression with its source text
#[derive(Clone, Debug)]
pub struct Pattern {
    inner: Rc<CompiledPattern>,
}

impl Pattern {
    /// Compile a pattern
    ///
    /// # Errors
    /// Returns `RuntimeError::Format` when the source is not a valid expression
    pub fn new(source: &str) -> RuntimeResult<Self> {
        let invalid = |e: regex::Error| RuntimeError::Format {
            msg: format!("invalid pattern /{}/: {}", source, e),
        };
        let regex = Regex::new(source).map_err(invalid)?;
        let whole = Regex::new(&format!("^(?:{})$", source)).map_err(invalid)?;
        Ok(Self {
            inner: Rc::new(CompiledPattern {
                source: source.to_string(),
                regex,
                whole,
            }),
        })
    }

    pub fn source(&self) -> &str {
        &self.inner.source
    }

    /// True when the whole text matches
    pub fn matches(&self, text: &str) -> bool {
        self.inner.whole.is_match(text)
    }

    /// First matching substring
    pub fn find(&self, text: &str) -> Option<String> {
        self.inner.regex.find(text).map(|m| m.as_str().to_string())
    }

    /// Every matching substring, left to right
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.inner
            .regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Split around matches, dropping trailing empty pieces
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut pieces: Vec<String> = self.inner.regex.split(text).map(str::to_string).collect();
        while pieces.last().is_some_and(|p| p.is_empty()) {
            pieces.pop();
        }
        pieces
    }

    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        self.inner.regex.replace_all(text, replacement).into_owned()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_renders_values() {
        let sb = StringBuffer::new("n=");
        sb.append(&Value::Number(3.0)).append(&Value::Null);
        assert_eq!(sb.to_string(), "n=3null");
        assert_eq!(sb.size(), 7);
    }

    #[test]
    fn test_pattern_matches_whole_text() {
        let p = Pattern::new(r"\d+").unwrap();
        assert!(p.matches("123"));
        assert!(!p.matches("a123"));
        assert_eq!(p.find("a123b"), Some("123".to_string()));
        assert_eq!(p.find_all("1 a 22"), vec!["1".to_string(), "22".to_string()]);
    }

    #[test]
    fn test_split_drops_trailing_empties() {
        let p = Pattern::new(",").unwrap();
        assert_eq!(p.split("a,,b,,"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_invalid_pattern_is_format_error() {
        assert!(matches!(
            Pattern::new("(unclosed"),
            Err(RuntimeError::Format { .. })
        ));
    }
}
