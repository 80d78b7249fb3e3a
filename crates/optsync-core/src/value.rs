//! Option values
//!
//! Values stay loosely typed: whatever a form or host wrote is kept as-is,
//! with no coercion toward the type of the declared default. Stored JSON
//! outside bool/number/text (a leftover `null`, an array) is carried as
//! `Other` so migrations can still see and remove it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

/// The options record: option name to value
pub type Options = BTreeMap<String, OptionValue>;

impl OptionValue {
    /// Truthiness as a checkbox `checked` assignment sees it
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            OptionValue::Text(s) => !s.is_empty(),
            OptionValue::Other(v) => !v.is_null(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// String form written into a field's `value`
impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::Other(serde_json::Value::Null) => Ok(()),
            OptionValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Number(n.into())
    }
}

impl From<u64> for OptionValue {
    fn from(n: u64) -> Self {
        OptionValue::Number(n.into())
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Number(i64::from(n).into())
    }
}

/// Build an `Options` record from `name => value` pairs
#[macro_export]
macro_rules! options {
    () => {
        $crate::Options::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Options::new();
        $(
            record.insert(
                ::std::string::String::from($name),
                $crate::OptionValue::from($value),
            );
        )+
        record
    }};
}
