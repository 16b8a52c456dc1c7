use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::value::{ColumnType, Value};

/// Name and declared type of a column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: ColumnType,
}

/// A named, typed, immutable column.
///
/// Cell storage is shared (`Arc`), so cloning a column (and by extension a
/// [`Frame`](crate::Frame)) never copies cell data. Derived frames share
/// storage with their source; the source stays valid and unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    schema: ColumnSchema,
    values: Arc<[Value]>,
}

impl Column {
    /// Create a column, validating every value against the declared type.
    ///
    /// `Null` is admissible in a column of any type; any other value must
    /// match `column_type`.
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        values: Vec<Value>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        for (row, value) in values.iter().enumerate() {
            if let Some(actual) = value.value_type() {
                if actual != column_type {
                    return Err(ModelError::TypeMismatch {
                        name,
                        row,
                        expected: column_type,
                        actual,
                    });
                }
            }
        }
        Ok(Self {
            schema: ColumnSchema { name, column_type },
            values: values.into(),
        })
    }

    /// Build a number column from optional values (`None` becomes `Null`).
    pub fn numbers(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<f64>>,
    ) -> Self {
        Self::from_options(name, ColumnType::Number, values, Value::Number)
    }

    /// Build a text column from optional values (`None` becomes `Null`).
    pub fn texts<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        Self::from_options(name, ColumnType::Text, values, |s| Value::Text(s.into()))
    }

    /// Build a bool column from optional values (`None` becomes `Null`).
    pub fn bools(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<bool>>,
    ) -> Self {
        Self::from_options(name, ColumnType::Bool, values, Value::Bool)
    }

    fn from_options<T>(
        name: impl Into<String>,
        column_type: ColumnType,
        values: impl IntoIterator<Item = Option<T>>,
        wrap: impl Fn(T) -> Value,
    ) -> Self {
        let values: Vec<Value> = values
            .into_iter()
            .map(|v| v.map(&wrap).unwrap_or(Value::Null))
            .collect();
        Self {
            schema: ColumnSchema {
                name: name.into(),
                column_type,
            },
            values: values.into(),
        }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.schema.column_type
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Gather the rows at `indices` (in order) into a new column sharing the
    /// same schema.
    ///
    /// Panics if any index is out of bounds, like slice indexing.
    pub fn take(&self, indices: &[usize]) -> Self {
        let values: Vec<Value> = indices.iter().map(|&row| self.values[row].clone()).collect();
        Self {
            schema: self.schema.clone(),
            values: values.into(),
        }
    }
}
