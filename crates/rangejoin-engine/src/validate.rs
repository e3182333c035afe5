//! Fail-fast validation of join parameters and ranges.
//!
//! All checks run before any index is built and stop at the first failure.
//! Order: join type, column specs, then ranges. Every range check is applied
//! to the left side before the right side, one check at a time.

use hashbrown::HashSet;
use rangejoin_error::{JoinError, Param, Result};
use rangejoin_types::{CellValue, ColumnArg, JoinSpec, JoinType, Range};
use smallvec::SmallVec;
use tracing::debug;

use crate::instrumentation::record_validation_failure;
use crate::trim::trim_range;

/// A validated list of join columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    one_based: SmallVec<[usize; 4]>,
    zero_based: SmallVec<[usize; 4]>,
}

impl ColumnSpec {
    fn from_one_based(indexes: SmallVec<[usize; 4]>) -> Self {
        let zero_based = indexes.iter().map(|&idx| idx - 1).collect();
        Self {
            one_based: indexes,
            zero_based,
        }
    }

    /// Column indexes as supplied (1-based).
    #[must_use]
    pub fn one_based(&self) -> &[usize] {
        &self.one_based
    }

    /// Column indexes for slicing rows (0-based).
    #[must_use]
    pub fn zero_based(&self) -> &[usize] {
        &self.zero_based
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.one_based.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.one_based.is_empty()
    }
}

/// Everything the hash join needs, normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedJoin {
    /// Trimmed, rectangular left range.
    pub left: Range,
    /// Trimmed, rectangular right range.
    pub right: Range,
    pub left_columns: ColumnSpec,
    pub right_columns: ColumnSpec,
    pub spec: JoinSpec,
}

/// Validate a complete join call.
///
/// # Errors
///
/// Returns the first [`JoinError`] encountered, in check order.
pub fn validate_join(
    left: Range,
    right: Range,
    left_columns: ColumnArg,
    right_columns: ColumnArg,
    join_type: Option<&str>,
    has_header: bool,
) -> Result<ValidatedJoin> {
    let outcome = validate_join_type(join_type).and_then(|join_type| {
        let (left_columns, right_columns) = validate_column_specs(left_columns, right_columns)?;
        let (left, right) =
            validate_ranges(left, right, &left_columns, &right_columns, has_header)?;
        Ok(ValidatedJoin {
            left,
            right,
            left_columns,
            right_columns,
            spec: JoinSpec {
                join_type,
                has_header,
            },
        })
    });

    match &outcome {
        Ok(validated) => debug!(
            join_type = %validated.spec.join_type,
            has_header,
            left_rows = validated.left.height(),
            left_width = validated.left.width(),
            right_rows = validated.right.height(),
            right_width = validated.right.width(),
            key_columns = validated.left_columns.len(),
            "join inputs validated"
        ),
        Err(err) => {
            record_validation_failure();
            debug!(error = %err, "join validation failed");
        }
    }
    outcome
}

/// Parse the optional join type, defaulting to INNER.
///
/// # Errors
///
/// [`JoinError::JoinType`] with the upper-cased value if it is neither
/// `INNER` nor `LEFT`.
pub fn validate_join_type(join_type: Option<&str>) -> Result<JoinType> {
    join_type.map_or(Ok(JoinType::Inner), |value| value.parse())
}

/// Validate the paired column arguments.
///
/// # Errors
///
/// In order: `LengthMismatch`, `EmptySpec`, `NonInteger`, `DuplicateColumn`,
/// `InvalidBounds`.
pub fn validate_column_specs(
    left: ColumnArg,
    right: ColumnArg,
) -> Result<(ColumnSpec, ColumnSpec)> {
    let left = left.into_list();
    let right = right.into_list();

    if left.len() != right.len() {
        return Err(JoinError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    if left.is_empty() {
        return Err(JoinError::EmptySpec {
            param: Param::LeftColumns,
        });
    }

    let left = integers(Param::LeftColumns, &left)?;
    let right = integers(Param::RightColumns, &right)?;
    reject_duplicates(Param::LeftColumns, &left)?;
    reject_duplicates(Param::RightColumns, &right)?;
    let left = positive(Param::LeftColumns, &left)?;
    let right = positive(Param::RightColumns, &right)?;

    Ok((
        ColumnSpec::from_one_based(left),
        ColumnSpec::from_one_based(right),
    ))
}

fn integers(param: Param, items: &[CellValue]) -> Result<SmallVec<[i64; 4]>> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            item.as_integer().ok_or_else(|| JoinError::NonInteger {
                param,
                position,
                value: describe(item),
            })
        })
        .collect()
}

fn describe(item: &CellValue) -> String {
    match item {
        CellValue::Text(text) => format!("{text:?}"),
        other => other.to_string(),
    }
}

fn reject_duplicates(param: Param, indexes: &[i64]) -> Result<()> {
    let mut seen = HashSet::with_capacity(indexes.len());
    for &index in indexes {
        if !seen.insert(index) {
            return Err(JoinError::DuplicateColumn { param, index });
        }
    }
    Ok(())
}

fn positive(param: Param, indexes: &[i64]) -> Result<SmallVec<[usize; 4]>> {
    indexes
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            if index < 1 {
                return Err(JoinError::InvalidBounds {
                    param,
                    position,
                    index,
                });
            }
            // Indexes too large for usize cannot fit any range; the bounds
            // check against the range width reports them.
            Ok(usize::try_from(index).unwrap_or(usize::MAX))
        })
        .collect()
}

/// Validate and trim both ranges against their column specs.
///
/// # Errors
///
/// In order: `EmptyRange`, `EmptyAfterTrim`, `IrregularRange`,
/// `ColumnOutOfBounds`, `InsufficientRows`.
pub fn validate_ranges(
    left: Range,
    right: Range,
    left_columns: &ColumnSpec,
    right_columns: &ColumnSpec,
    has_header: bool,
) -> Result<(Range, Range)> {
    check_not_empty(Param::LeftRange, &left)?;
    check_not_empty(Param::RightRange, &right)?;

    // Trimming can square off a ragged input, so shape is taken beforehand.
    let left_shape = (left.width(), left.first_irregular_row());
    let right_shape = (right.width(), right.first_irregular_row());

    let left = trim_range(left);
    let right = trim_range(right);
    debug!(
        left_rows = left.height(),
        left_width = left.width(),
        right_rows = right.height(),
        right_width = right.width(),
        "ranges trimmed"
    );

    let sides = [
        (Param::LeftRange, &left, left_columns),
        (Param::RightRange, &right, right_columns),
    ];
    for (param, range, _) in sides {
        if range.is_empty() {
            return Err(JoinError::EmptyAfterTrim { param });
        }
    }
    for (param, (expected, irregular)) in [
        (Param::LeftRange, left_shape),
        (Param::RightRange, right_shape),
    ] {
        if let Some((row, found)) = irregular {
            return Err(JoinError::IrregularRange {
                param,
                row,
                expected,
                found,
            });
        }
    }
    for (param, range, columns) in sides {
        let width = range.width();
        if let Some(&index) = columns.one_based().iter().find(|&&idx| idx > width) {
            return Err(JoinError::ColumnOutOfBounds {
                param,
                index,
                width,
            });
        }
    }
    let data_start = usize::from(has_header);
    for (param, range, _) in sides {
        if range.height() <= data_start {
            return Err(JoinError::InsufficientRows {
                param,
                rows: range.height(),
                has_header,
            });
        }
    }

    Ok((left, right))
}

fn check_not_empty(param: Param, range: &Range) -> Result<()> {
    if range.is_empty() {
        return Err(JoinError::EmptyRange { param });
    }
    Ok(())
}
