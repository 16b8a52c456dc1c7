use crate::column::Column;
use crate::error::ModelError;

/// An ordered sequence of uniquely-named, equal-length columns.
///
/// Row order is significant: every operation in this crate and in the engine
/// preserves it. Frames are immutable; reshaping operations return new frames
/// that share cell storage with their inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Create a frame, validating column-name uniqueness and equal lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self, ModelError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for column in &columns {
                if column.len() != expected {
                    return Err(ModelError::LengthMismatch {
                        name: column.name().to_string(),
                        expected,
                        actual: column.len(),
                    });
                }
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name() == column.name()) {
                return Err(ModelError::DuplicateColumn {
                    name: column.name().to_string(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// A frame with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Return a new frame with `column` appended, or replacing the existing
    /// column of the same name in place (last write wins, original position
    /// kept). The input frame is unchanged.
    pub fn with_column(&self, column: Column) -> Result<Self, ModelError> {
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(ModelError::LengthMismatch {
                name: column.name().to_string(),
                expected: self.row_count(),
                actual: column.len(),
            });
        }
        let mut columns = self.columns.clone();
        match columns.iter().position(|c| c.name() == column.name()) {
            Some(idx) => columns[idx] = column,
            None => columns.push(column),
        }
        Ok(Self { columns })
    }

    /// Project the named columns, in the given order, into a new frame.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, ModelError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let column = self
                .column(name)
                .ok_or_else(|| ModelError::UnknownColumn {
                    name: name.to_string(),
                })?;
            columns.push(column.clone());
        }
        Self::new(columns)
    }
}
