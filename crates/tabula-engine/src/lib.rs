#![forbid(unsafe_code)]

//! Distinct-row primitives over Tabula column frames.
//!
//! Two entry points:
//! - [`distinct`] / [`distinct_grouped`]: keep the first-occurring row for
//!   each distinct combination of one or more key expressions, optionally
//!   retaining all other columns. Group columns always join the identity
//!   tuple for grouped frames.
//! - [`n_distinct`]: count the distinct value-combinations across parallel
//!   sequences without materializing the unique set twice.
//!
//! The pipeline behind `distinct` is exposed piecewise for callers that need
//! to interleave their own steps: [`materialize_keys`] evaluates key
//! expressions into columns, [`ensure_dedupable`] refuses list-typed kept
//! columns, and [`select_distinct`] performs the single-pass first-occurrence
//! selection.
//!
//! Missing values are grouped as one concrete key by the selector, while the
//! counter's `na_rm` mode drops tuples containing them entirely; the two
//! policies differ on purpose.

mod count;
mod distinct;
mod error;
mod expr;
mod key;

pub use crate::count::n_distinct;
pub use crate::distinct::{
    distinct, distinct_grouped, ensure_dedupable, materialize_keys, select_distinct, Materialized,
};
pub use crate::error::EngineError;
pub use crate::expr::{BinaryOp, Expr, KeyExpr, UnaryOp};
