use ahash::AHashSet;

use tabula_model::{ColumnType, Frame, GroupedFrame};

use crate::error::EngineError;
use crate::expr::KeyExpr;
use crate::key::KeyValue;

/// Output of [`materialize_keys`]: the augmented frame plus the ordered,
/// deduplicated identity (`vars`) and projection (`keep`) column lists.
#[derive(Clone, Debug, PartialEq)]
pub struct Materialized {
    /// The input frame with every key column appended (or overwritten).
    pub frame: Frame,
    /// Columns defining the distinct-identity tuple.
    pub vars: Vec<String>,
    /// Columns retained in the output.
    pub keep: Vec<String>,
}

/// Evaluate key expressions against `frame` and derive the `vars`/`keep`
/// lists.
///
/// Each expression is evaluated in order against the current augmented state,
/// so a later key may reference a column computed by an earlier one. A key
/// whose name matches an existing column overwrites it in place (last write
/// wins). With no keys at all, every column becomes an identity column.
///
/// `group_vars` are appended to `vars` after the explicit keys, skipping
/// names already present; names that do not resolve to an augmented-frame
/// column are dropped silently.
///
/// The input frame is never mutated; the augmented frame shares cell storage
/// with it.
pub fn materialize_keys(
    frame: &Frame,
    keys: &[KeyExpr],
    group_vars: &[String],
    keep_all: bool,
) -> Result<Materialized, EngineError> {
    if keys.is_empty() {
        let all: Vec<String> = frame.column_names().map(str::to_string).collect();
        return Ok(Materialized {
            frame: frame.clone(),
            vars: all.clone(),
            keep: all,
        });
    }

    let mut augmented = frame.clone();
    let mut key_names: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        let column = key.evaluate(&augmented)?;
        key_names.push(column.name().to_string());
        augmented = augmented.with_column(column)?;
    }

    let mut vars: Vec<String> = Vec::with_capacity(key_names.len() + group_vars.len());
    for name in key_names.iter().chain(group_vars.iter()) {
        if augmented.has_column(name) && !vars.iter().any(|v| v == name) {
            vars.push(name.clone());
        }
    }

    let keep = if keep_all {
        augmented.column_names().map(str::to_string).collect()
    } else {
        vars.clone()
    };

    Ok(Materialized {
        frame: augmented,
        vars,
        keep,
    })
}

/// Refuse deduplication when any kept column is list-typed.
///
/// Runs after materialization (so computed key columns are covered) and
/// before the selector reads any value. The error names every offending
/// column.
pub fn ensure_dedupable(frame: &Frame, keep: &[String]) -> Result<(), EngineError> {
    let offending: Vec<String> = keep
        .iter()
        .filter(|name| {
            frame
                .column(name)
                .is_some_and(|c| c.column_type() == ColumnType::List)
        })
        .cloned()
        .collect();
    if offending.is_empty() {
        Ok(())
    } else {
        Err(EngineError::UnsupportedColumnType { columns: offending })
    }
}

/// Select one row per distinct tuple of values over `vars`, projected onto
/// `keep` (in `keep`'s order).
///
/// A single forward pass maps each key tuple to its first row index, so the
/// output row order is the order in which each distinct tuple first appears.
/// This is O(n) expected time; it exists precisely to avoid the O(n log n)
/// sort-then-dedup and O(n^2) pairwise alternatives.
///
/// Missing values are concrete keys equal only to each other: rows whose
/// tuples are `Null` in the same positions land in one group. Empty `vars`
/// falls back to whole-row deduplication over every column.
pub fn select_distinct(
    frame: &Frame,
    vars: &[String],
    keep: &[String],
) -> Result<Frame, EngineError> {
    let all_columns: Vec<String>;
    let vars: &[String] = if vars.is_empty() {
        all_columns = frame.column_names().map(str::to_string).collect();
        &all_columns
    } else {
        vars
    };

    let mut var_columns = Vec::with_capacity(vars.len());
    for name in vars {
        let column = frame
            .column(name)
            .ok_or_else(|| EngineError::UnknownColumn { name: name.clone() })?;
        var_columns.push(column);
    }

    let rows = frame.row_count();
    let mut seen: AHashSet<Vec<KeyValue<'_>>> = AHashSet::with_capacity(rows);
    let mut first_rows: Vec<usize> = Vec::new();
    for row in 0..rows {
        let mut tuple = Vec::with_capacity(var_columns.len());
        for column in &var_columns {
            let key = KeyValue::from_value(&column.values()[row]).ok_or_else(|| {
                EngineError::UnsupportedColumnType {
                    columns: vec![column.name().to_string()],
                }
            })?;
            tuple.push(key);
        }
        if seen.insert(tuple) {
            first_rows.push(row);
        }
    }

    let mut out = Vec::with_capacity(keep.len());
    for name in keep {
        let column = frame
            .column(name)
            .ok_or_else(|| EngineError::UnknownColumn { name: name.clone() })?;
        out.push(column.take(&first_rows));
    }
    Ok(Frame::new(out)?)
}

/// Keep the first-occurring row for each distinct combination of `keys`.
///
/// With `keep_all`, every column of the (augmented) frame is retained;
/// otherwise only the key columns are. With no keys, the whole row is the
/// key.
pub fn distinct(frame: &Frame, keys: &[KeyExpr], keep_all: bool) -> Result<Frame, EngineError> {
    let materialized = materialize_keys(frame, keys, &[], keep_all)?;
    ensure_dedupable(&materialized.frame, &materialized.keep)?;
    select_distinct(&materialized.frame, &materialized.vars, &materialized.keep)
}

/// [`distinct`] for a grouped frame: the group columns always extend the
/// identity tuple (and the kept columns), and the grouping survives on the
/// output.
pub fn distinct_grouped(
    grouped: &GroupedFrame,
    keys: &[KeyExpr],
    keep_all: bool,
) -> Result<GroupedFrame, EngineError> {
    let materialized = materialize_keys(grouped.frame(), keys, grouped.group_vars(), keep_all)?;
    ensure_dedupable(&materialized.frame, &materialized.keep)?;
    let selected = select_distinct(&materialized.frame, &materialized.vars, &materialized.keep)?;
    Ok(grouped.with_frame(selected)?)
}
