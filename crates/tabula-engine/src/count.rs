use ahash::AHashSet;

use tabula_model::Value;

use crate::error::EngineError;
use crate::key::KeyValue;

/// Count the distinct combinations across parallel value sequences.
///
/// The sequences are zipped positionally into tuples and counted through a
/// hash set in one pass; the unique combinations are never materialized a
/// second time, which is the point of this primitive over building the
/// distinct rows and counting them.
///
/// With `na_rm`, any tuple containing a missing value in any component is
/// excluded from the count entirely. Note the deliberate divergence from the
/// selector's policy: [`select_distinct`](crate::select_distinct) treats
/// missing values as one concrete group, while `na_rm` here drops the whole
/// tuple.
///
/// Errors with [`EngineError::LengthMismatch`] if the sequences disagree in
/// length, and [`EngineError::UnsupportedColumnType`] if any value is a
/// list. Zero sequences count zero combinations.
pub fn n_distinct(sequences: &[&[Value]], na_rm: bool) -> Result<usize, EngineError> {
    let Some(first) = sequences.first() else {
        return Ok(0);
    };
    let expected = first.len();
    for (index, sequence) in sequences.iter().enumerate() {
        if sequence.len() != expected {
            return Err(EngineError::LengthMismatch {
                index,
                expected,
                actual: sequence.len(),
            });
        }
    }

    let mut seen: AHashSet<Vec<KeyValue<'_>>> = AHashSet::with_capacity(expected);
    'rows: for row in 0..expected {
        let mut tuple = Vec::with_capacity(sequences.len());
        for (index, sequence) in sequences.iter().enumerate() {
            let value = &sequence[row];
            if na_rm && value.is_null() {
                continue 'rows;
            }
            let key =
                KeyValue::from_value(value).ok_or_else(|| EngineError::UnsupportedColumnType {
                    columns: vec![format!("sequence {index}")],
                })?;
            tuple.push(key);
        }
        seen.insert(tuple);
    }
    Ok(seen.len())
}
