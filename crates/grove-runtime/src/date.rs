//! Temporal type (`java.util.Date`)
//!
//! A point in time without a timezone, formatted and parsed with Java-style
//! pattern letters (`yyyy`, `MM`, `dd`, `HH`, ...). Patterns are translated to
//! chrono format items, so results never depend on the host locale or zone.

use crate::value::{RuntimeError, RuntimeResult};
use chrono::format::{parse, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use grove_config::DEFAULT_DATE_PATTERN;
use std::fmt;

/// Point in time with millisecond-or-better precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemporalValue {
    instant: NaiveDateTime,
}

impl TemporalValue {
    /// Current instant
    pub fn now() -> Self {
        Self {
            instant: Utc::now().naive_utc(),
        }
    }

    pub fn from_naive(instant: NaiveDateTime) -> Self {
        Self { instant }
    }

    /// Instant `millis` milliseconds after the Unix epoch
    pub fn from_epoch_millis(millis: i64) -> RuntimeResult<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(|dt| Self {
                instant: dt.naive_utc(),
            })
            .ok_or_else(|| RuntimeError::Format {
                msg: format!("timestamp {} is out of range", millis),
            })
    }

    pub fn epoch_millis(&self) -> i64 {
        self.instant.and_utc().timestamp_millis()
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.instant
    }

    /// Parse `text` against a pattern
    ///
    /// Fields the pattern does not mention default to 1970-01-01 and midnight.
    ///
    /// # Errors
    /// Returns `RuntimeError::Format` for unsupported patterns or text that does not match
    pub fn parse(pattern: &str, text: &str) -> RuntimeResult<Self> {
        let compiled = compile_pattern(pattern)?;
        let mut parsed = Parsed::new();
        parse(&mut parsed, text, StrftimeItems::new(&compiled.format)).map_err(|e| {
            RuntimeError::Format {
                msg: format!("cannot parse '{}' with pattern '{}': {}", text, pattern, e),
            }
        })?;

        apply_defaults(&mut parsed, &compiled).map_err(|e| RuntimeError::Format {
            msg: format!("cannot parse '{}': {}", text, e),
        })?;

        let date = parsed.to_naive_date().map_err(|e| RuntimeError::Format {
            msg: format!("invalid date '{}': {}", text, e),
        })?;
        let time = if compiled.has_time {
            parsed.to_naive_time().map_err(|e| RuntimeError::Format {
                msg: format!("invalid time '{}': {}", text, e),
            })?
        } else {
            NaiveTime::MIN
        };
        Ok(Self {
            instant: date.and_time(time),
        })
    }

    /// Render with a pattern
    ///
    /// # Errors
    /// Returns `RuntimeError::Format` for unsupported pattern letters
    pub fn format(&self, pattern: &str) -> RuntimeResult<String> {
        let compiled = compile_pattern(pattern)?;
        Ok(self.instant.and_utc().format(&compiled.format).to_string())
    }

    /// Shift by whole days
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeError` when the result falls outside the supported calendar
    pub fn plus_days(&self, days: i64) -> RuntimeResult<Self> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.instant.checked_add_signed(delta))
            .map(|instant| Self { instant })
            .ok_or_else(|| RuntimeError::TypeError {
                msg: format!("adding {} days to {} is out of range", days, self),
            })
    }

    /// Whole days from `other` to `self`
    pub fn days_since(&self, other: &TemporalValue) -> i64 {
        (self.instant - other.instant).num_days()
    }

    pub fn year(&self) -> i32 {
        self.instant.year()
    }

    /// Month, 1-based
    pub fn month(&self) -> u32 {
        self.instant.month()
    }

    pub fn day(&self) -> u32 {
        self.instant.day()
    }

    pub fn hour(&self) -> u32 {
        self.instant.hour()
    }

    pub fn minute(&self) -> u32 {
        self.instant.minute()
    }

    pub fn second(&self) -> u32 {
        self.instant.second()
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format(DEFAULT_DATE_PATTERN) {
            Ok(text) => write!(f, "{}", text),
            Err(_) => write!(f, "{}", self.instant),
        }
    }
}

struct CompiledPattern {
    format: String,
    has_year: bool,
    has_month: bool,
    has_day: bool,
    has_time: bool,
}

/// Translate a Java-style pattern into a chrono format string
fn compile_pattern(pattern: &str) -> RuntimeResult<CompiledPattern> {
    let mut compiled = CompiledPattern {
        format: String::with_capacity(pattern.len() * 2),
        has_year: false,
        has_month: false,
        has_day: false,
        has_time: false,
    };
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // '' is a literal quote, 'text' is literal text
            if chars.get(i + 1) == Some(&'\'') {
                compiled.format.push('\'');
                i += 2;
                continue;
            }
            let mut j = i + 1;
            loop {
                match chars.get(j) {
                    None => {
                        return Err(RuntimeError::Format {
                            msg: format!("unterminated quote in pattern '{}'", pattern),
                        })
                    }
                    Some('\'') if chars.get(j + 1) == Some(&'\'') => {
                        compiled.format.push('\'');
                        j += 2;
                    }
                    Some('\'') => break,
                    Some(&literal) => {
                        push_literal(&mut compiled.format, literal);
                        j += 1;
                    }
                }
            }
            i = j + 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut compiled.format, c);
            i += 1;
            continue;
        }

        let mut run = 1;
        while chars.get(i + run) == Some(&c) {
            run += 1;
        }

        let item = match (c, run) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1) => "%-d",
            ('d', _) => "%d",
            ('H', 1) => "%-H",
            ('H', _) => "%H",
            ('h', 1) => "%-I",
            ('h', _) => "%I",
            ('m', 1) => "%-M",
            ('m', _) => "%M",
            ('s', 1) => "%-S",
            ('s', _) => "%S",
            ('S', _) => "%3f",
            ('a', _) => "%p",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            ('Z', _) => "%z",
            _ => {
                return Err(RuntimeError::Format {
                    msg: format!("unsupported pattern letter '{}' in '{}'", c, pattern),
                })
            }
        };
        match c {
            'y' => compiled.has_year = true,
            'M' => compiled.has_month = true,
            'd' => compiled.has_day = true,
            'H' | 'h' | 'm' | 's' | 'S' => compiled.has_time = true,
            _ => {}
        }
        compiled.format.push_str(item);
        i += run;
    }

    Ok(compiled)
}

/// Fill in date fields the pattern never mentions
fn apply_defaults(parsed: &mut Parsed, compiled: &CompiledPattern) -> ParseResult<()> {
    if !compiled.has_year {
        parsed.set_year(1970)?;
    }
    if !compiled.has_month {
        parsed.set_month(1)?;
    }
    if !compiled.has_day {
        parsed.set_day(1)?;
    }
    Ok(())
}

fn push_literal(format: &mut String, c: char) {
    if c == '%' {
        format.push_str("%%");
    } else {
        format.push(c);
    }
}
