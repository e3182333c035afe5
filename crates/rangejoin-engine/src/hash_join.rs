//! Hash join over two ranges.
//!
//! Two-phase equi-join: build a hash table from the right range's data rows,
//! then probe it once per left data row. Output rows are the left row
//! followed by the right row with its join columns removed. Supports inner
//! and left outer joins.

use hashbrown::HashMap;
use rangejoin_error::{JoinError, Param, Result};
use rangejoin_types::{CellValue, JoinSpec, JoinType, Range};
use smallvec::SmallVec;
use tracing::debug;

use crate::instrumentation::{record_build, record_join_completed, record_probe};
use crate::key::{CompositeKey, build_key_into};
use crate::validate::ValidatedJoin;

// ── Build-Side Hash Table ──────────────────────────────────────────────────

/// Hash table built from the right range.
///
/// Lives for one join call. Rows are stored densely in scan order and
/// buckets hold positions into that store, so duplicate keys keep the right
/// side's original order.
#[derive(Debug)]
pub struct HashJoinTable {
    /// Right data rows with join columns stripped, in scan order.
    rows: Vec<Vec<CellValue>>,
    /// Composite key → positions in `rows`.
    buckets: HashMap<CompositeKey, SmallVec<[usize; 2]>>,
    /// Non-key width of the right range; the NULL run for a LEFT miss.
    payload_width: usize,
}

impl HashJoinTable {
    /// Number of indexed right rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn distinct_keys(&self) -> usize {
        self.buckets.len()
    }

    /// Width of the stripped right rows.
    #[must_use]
    pub const fn payload_width(&self) -> usize {
        self.payload_width
    }

    /// Stripped right rows sharing `key`, in original order.
    pub fn matches<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a [CellValue]> + 'a {
        self.buckets
            .get(key)
            .into_iter()
            .flat_map(|positions| positions.iter())
            .map(|&pos| self.rows[pos].as_slice())
    }
}

/// Build a hash table from `right` rows `[data_start, len)`.
///
/// `key_columns` are 0-based and identify the join key.
///
/// # Errors
///
/// Returns [`JoinError::ColumnOutOfBounds`] if a key column lies outside a
/// right row.
pub fn hash_join_build(
    right: &Range,
    key_columns: &[usize],
    data_start: usize,
) -> Result<HashJoinTable> {
    let data = right.rows().get(data_start..).unwrap_or_default();
    let mut rows = Vec::with_capacity(data.len());
    let mut buckets: HashMap<CompositeKey, SmallVec<[usize; 2]>> =
        HashMap::with_capacity(data.len());
    let mut key = String::new();

    for row in data {
        if !build_key_into(&mut key, row, key_columns) {
            return Err(out_of_bounds(Param::RightRange, row, key_columns));
        }
        let pos = rows.len();
        rows.push(strip_columns(row, key_columns));
        if let Some(bucket) = buckets.get_mut(key.as_str()) {
            bucket.push(pos);
        } else {
            buckets.insert(key.clone(), smallvec::smallvec![pos]);
        }
    }

    record_build(rows.len());
    Ok(HashJoinTable {
        rows,
        buckets,
        payload_width: right.width().saturating_sub(key_columns.len()),
    })
}

// ── Probe Phase ────────────────────────────────────────────────────────────

/// Probe the hash table with `left` rows `[data_start, len)`.
///
/// Each left row yields one output row per match, in bucket order. A left
/// row with no match yields nothing for [`JoinType::Inner`] and one
/// NULL-padded row for [`JoinType::Left`].
///
/// # Errors
///
/// Returns [`JoinError::ColumnOutOfBounds`] if a key column lies outside a
/// left row.
pub fn hash_join_probe(
    table: &HashJoinTable,
    left: &Range,
    key_columns: &[usize],
    join_type: JoinType,
    data_start: usize,
) -> Result<Vec<Vec<CellValue>>> {
    let data = left.rows().get(data_start..).unwrap_or_default();
    let mut output = Vec::with_capacity(data.len());
    let mut null_padded = 0_usize;
    let mut key = String::new();

    for left_row in data {
        if !build_key_into(&mut key, left_row, key_columns) {
            return Err(out_of_bounds(Param::LeftRange, left_row, key_columns));
        }

        let before = output.len();
        for right_row in table.matches(&key) {
            output.push(concat_row(left_row, right_row));
        }

        if output.len() == before && join_type == JoinType::Left {
            let mut row = Vec::with_capacity(left_row.len() + table.payload_width);
            row.extend_from_slice(left_row);
            row.resize(left_row.len() + table.payload_width, CellValue::Null);
            output.push(row);
            null_padded += 1;
        }
    }

    record_probe(data.len(), output.len(), null_padded);
    Ok(output)
}

// ── Orchestration ──────────────────────────────────────────────────────────

/// Join two ranges on their key columns.
///
/// With `spec.has_header`, the first output row is the left header followed
/// by the right header minus its key columns, and the first row of each
/// range is excluded from matching.
///
/// # Errors
///
/// Returns [`JoinError::ColumnOutOfBounds`] if a key column lies outside a
/// row. Inputs produced by [`validate_join`](crate::validate_join) never
/// fail.
pub fn hash_join(
    left: &Range,
    right: &Range,
    left_key_columns: &[usize],
    right_key_columns: &[usize],
    spec: JoinSpec,
) -> Result<Range> {
    let data_start = usize::from(spec.has_header);
    let _span = tracing::debug_span!(
        "hash_join",
        join_type = %spec.join_type,
        has_header = spec.has_header,
        left_rows = left.height(),
        right_rows = right.height(),
        key_columns = left_key_columns.len(),
    )
    .entered();

    let table = hash_join_build(right, right_key_columns, data_start)?;
    let body = hash_join_probe(&table, left, left_key_columns, spec.join_type, data_start)?;

    let mut rows = Vec::with_capacity(body.len() + data_start);
    if spec.has_header {
        if let (Some(left_header), Some(right_header)) = (left.row(0), right.row(0)) {
            rows.push(concat_row(
                left_header,
                &strip_columns(right_header, right_key_columns),
            ));
        }
    }
    let emitted = body.len();
    rows.extend(body);

    record_join_completed();
    debug!(
        indexed_rows = table.len(),
        distinct_keys = table.distinct_keys(),
        emitted_rows = emitted,
        "hash join complete"
    );
    Ok(Range::new(rows))
}

/// Run the hash join on validated inputs.
///
/// # Errors
///
/// Propagates [`hash_join`] errors, which validated inputs do not produce.
pub fn execute_join(validated: &ValidatedJoin) -> Result<Range> {
    hash_join(
        &validated.left,
        &validated.right,
        validated.left_columns.zero_based(),
        validated.right_columns.zero_based(),
        validated.spec,
    )
}

// ── Helpers ────────────────────────────────────────────────────────────────

/// Copy of `row` without the columns in `key_columns`, order preserved.
fn strip_columns(row: &[CellValue], key_columns: &[usize]) -> Vec<CellValue> {
    row.iter()
        .enumerate()
        .filter(|(idx, _)| !key_columns.contains(idx))
        .map(|(_, cell)| cell.clone())
        .collect()
}

fn concat_row(left: &[CellValue], right: &[CellValue]) -> Vec<CellValue> {
    let mut row = Vec::with_capacity(left.len() + right.len());
    row.extend_from_slice(left);
    row.extend_from_slice(right);
    row
}

fn out_of_bounds(param: Param, row: &[CellValue], key_columns: &[usize]) -> JoinError {
    let width = row.len();
    let index = key_columns
        .iter()
        .copied()
        .find(|&col| col >= width)
        .unwrap_or(width);
    JoinError::ColumnOutOfBounds {
        param,
        index: index + 1,
        width,
    }
}
