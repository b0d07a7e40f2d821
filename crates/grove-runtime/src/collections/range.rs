//! Inclusive integer range (`groovy.lang.IntRange`)

use crate::value::Value;
use std::fmt;

/// Immutable inclusive range; `from > to` walks downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    from: i64,
    to: i64,
}

impl IntRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn to(&self) -> i64 {
        self.to
    }

    pub fn is_reverse(&self) -> bool {
        self.from > self.to
    }

    /// Number of elements, saturating at `usize::MAX`
    pub fn size(&self) -> usize {
        usize::try_from(self.from.abs_diff(self.to))
            .unwrap_or(usize::MAX)
            .saturating_add(1)
    }

    /// Element at a position from the start
    pub fn get(&self, index: usize) -> Option<i64> {
        let offset = i128::try_from(index).ok()?;
        if offset > i128::from(self.from.abs_diff(self.to)) {
            return None;
        }
        let value = if self.is_reverse() {
            i128::from(self.from) - offset
        } else {
            i128::from(self.from) + offset
        };
        i64::try_from(value).ok()
    }

    pub fn contains(&self, n: f64) -> bool {
        let (low, high) = if self.is_reverse() {
            (self.to, self.from)
        } else {
            (self.from, self.to)
        };
        n.fract() == 0.0 && n >= low as f64 && n <= high as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.size()).filter_map(move |i| self.get(i))
    }

    pub fn to_values(&self) -> Vec<Value> {
        self.iter().map(|n| Value::Number(n as f64)).collect()
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}
