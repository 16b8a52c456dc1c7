use thiserror::Error;

use tabula_model::{ColumnType, ModelError};

/// Errors produced by the distinct primitives and the key-expression
/// evaluator.
///
/// Every failure is fail-fast: no partial result is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A to-be-kept column holds list values, which have no equality/hash
    /// suitable for deduplication.
    #[error("cannot compute distinct rows over list column(s): {}", columns.join(", "))]
    UnsupportedColumnType { columns: Vec<String> },
    /// Counter input sequences disagree in length.
    #[error("sequence {index} has length {actual}, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    /// An expression referenced a column the frame does not have.
    #[error("unknown column '{name}'")]
    UnknownColumn { name: String },
    /// An expression operator was applied to an operand of the wrong kind.
    #[error("operator '{op}' expects {expected} operands, got {actual}")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        actual: ColumnType,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}
