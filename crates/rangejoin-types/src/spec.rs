//! Join parameters: join type, header flag, column arguments.

use std::fmt;
use std::str::FromStr;

use rangejoin_error::JoinError;
use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Supported join variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinType {
    /// Emit only left rows with at least one match.
    #[default]
    Inner,
    /// Emit every left row; NULL-pad right columns on miss.
    Left,
}

impl JoinType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse. The error carries the upper-cased input.
impl FromStr for JoinType {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_uppercase();
        match normalized.as_str() {
            "INNER" => Ok(Self::Inner),
            "LEFT" => Ok(Self::Left),
            _ => Err(JoinError::JoinType(normalized)),
        }
    }
}

/// How a join is executed once its inputs are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSpec {
    pub join_type: JoinType,
    /// Treat the first row of each range as a header.
    pub has_header: bool,
}

impl Default for JoinSpec {
    fn default() -> Self {
        Self {
            join_type: JoinType::Inner,
            has_header: true,
        }
    }
}

/// A column argument: one column or an ordered list of columns, 1-based.
///
/// Elements are cell values rather than integers because callers hand over
/// whatever their grid holds; validation rejects anything non-integral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnArg {
    List(Vec<CellValue>),
    Single(CellValue),
}

impl ColumnArg {
    /// The argument as a list; a bare value becomes a one-element list.
    #[must_use]
    pub fn into_list(self) -> Vec<CellValue> {
        match self {
            Self::List(items) => items,
            Self::Single(item) => vec![item],
        }
    }
}

impl From<usize> for ColumnArg {
    fn from(value: usize) -> Self {
        Self::Single(CellValue::from(value))
    }
}

impl From<i64> for ColumnArg {
    fn from(value: i64) -> Self {
        Self::Single(CellValue::from(value))
    }
}

impl From<i32> for ColumnArg {
    fn from(value: i32) -> Self {
        Self::Single(CellValue::from(value))
    }
}

impl From<CellValue> for ColumnArg {
    fn from(value: CellValue) -> Self {
        Self::Single(value)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for ColumnArg {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CellValue> + Copy> From<&[T]> for ColumnArg {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().map(|&v| v.into()).collect())
    }
}
