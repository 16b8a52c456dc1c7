use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The declared semantic type of a column.
///
/// Every [`Column`](crate::Column) declares one of these; a cell either holds
/// a value of the declared type or [`Value::Null`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// IEEE-754 double precision numbers.
    Number,
    /// Plain strings.
    Text,
    /// Booleans.
    Bool,
    /// Naive timestamps (no timezone).
    DateTime,
    /// Variable-length nested collections. List columns can be stored and
    /// projected but have no equality/hash suitable for deduplication.
    List,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Number => "number",
            ColumnType::Text => "text",
            ColumnType::Bool => "bool",
            ColumnType::DateTime => "datetime",
            ColumnType::List => "list",
        };
        f.write_str(name)
    }
}

/// One scalar cell value.
///
/// The enum uses an explicit `{type, value}` tagged layout for stable
/// serialization. `Null` is the single missing-value sentinel and is
/// admissible in a column of any declared type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Missing / unset value.
    Null,
    /// IEEE-754 double precision number.
    Number(f64),
    /// Plain string.
    Text(String),
    /// Boolean.
    Bool(bool),
    /// Naive timestamp.
    DateTime(NaiveDateTime),
    /// Nested collection of values.
    List(Vec<Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    /// Returns true if the value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The column type this value belongs to, or `None` for `Null` (a null
    /// cell fits a column of any declared type).
    pub fn value_type(&self) -> Option<ColumnType> {
        match self {
            Value::Null => None,
            Value::Number(_) => Some(ColumnType::Number),
            Value::Text(_) => Some(ColumnType::Text),
            Value::Bool(_) => Some(ColumnType::Bool),
            Value::DateTime(_) => Some(ColumnType::DateTime),
            Value::List(_) => Some(ColumnType::List),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
