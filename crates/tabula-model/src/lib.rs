#![forbid(unsafe_code)]

//! Core in-memory data model for Tabula column frames.
//!
//! This crate holds the owned tabular representation the engine crates operate
//! on:
//! - [`Value`] / [`ColumnType`]: one scalar cell value and the declared
//!   semantic type of a column,
//! - [`Column`]: a named, typed, immutable column with shared storage,
//! - [`Frame`]: an ordered set of uniquely-named equal-length columns,
//! - [`GroupedFrame`]: a frame paired with an explicit ordered list of group
//!   columns.
//!
//! Grouping is always carried as an explicit wrapper rather than hidden state
//! on the frame value, so every consumer sees exactly which columns partition
//! the rows.

mod column;
mod error;
mod frame;
mod group;
mod value;

pub use crate::column::{Column, ColumnSchema};
pub use crate::error::ModelError;
pub use crate::frame::Frame;
pub use crate::group::GroupedFrame;
pub use crate::value::{ColumnType, Value};
