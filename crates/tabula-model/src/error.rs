use thiserror::Error;

use crate::value::ColumnType;

/// Errors that can occur when building or reshaping model values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("column '{name}' is declared {expected} but row {row} holds a {actual} value")]
    TypeMismatch {
        name: String,
        row: usize,
        expected: ColumnType,
        actual: ColumnType,
    },
    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },
    #[error("column '{name}' has {actual} rows but the frame has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("unknown column '{name}'")]
    UnknownColumn { name: String },
}
