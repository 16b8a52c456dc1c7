use chrono::NaiveDateTime;
use ordered_float::OrderedFloat;

use tabula_model::Value;

/// Hashable projection of one scalar value, used as a component of a
/// distinct-key tuple.
///
/// `Null` is a concrete key equal only to other `Null`s, so missing values
/// form exactly one group. Numbers go through [`OrderedFloat`], which makes
/// every NaN one key and `-0.0` equal to `0.0`, keeping `Eq` and `Hash`
/// consistent. List values have no key projection and are refused upstream.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum KeyValue<'a> {
    Null,
    Number(OrderedFloat<f64>),
    Text(&'a str),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl<'a> KeyValue<'a> {
    /// Project a scalar value to its key form; `None` for list values.
    pub(crate) fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => Some(KeyValue::Null),
            Value::Number(n) => Some(KeyValue::Number(OrderedFloat(*n))),
            Value::Text(s) => Some(KeyValue::Text(s)),
            Value::Bool(b) => Some(KeyValue::Bool(*b)),
            Value::DateTime(dt) => Some(KeyValue::DateTime(*dt)),
            Value::List(_) => None,
        }
    }
}
