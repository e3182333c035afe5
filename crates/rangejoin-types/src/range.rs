//! Two-dimensional ranges of cells and the inputs that resolve to them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Ordered rows of cells.
///
/// A `Range` is not required to be rectangular on construction: irregular
/// shapes are reported by validation rather than rejected here. A range is
/// empty when no row holds a cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Range {
    rows: Vec<Vec<CellValue>>,
}

impl Range {
    #[must_use]
    pub const fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Build a range from any grid of values convertible into cells.
    #[must_use]
    pub fn from_grid<T, R, G>(grid: G) -> Self
    where
        T: Into<CellValue>,
        R: IntoIterator<Item = T>,
        G: IntoIterator<Item = R>,
    {
        Self {
            rows: grid
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// The "nothing left" result of trimming: one row of zero columns.
    #[must_use]
    pub fn empty_sentinel() -> Self {
        Self {
            rows: vec![Vec::new()],
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }

    #[must_use]
    pub fn row(&self, idx: usize) -> Option<&[CellValue]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row (0 for a range with no rows).
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// First row whose width differs from the first row's, as
    /// `(row_index, width)`.
    #[must_use]
    pub fn first_irregular_row(&self) -> Option<(usize, usize)> {
        let expected = self.width();
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
            .map(|(idx, row)| (idx, row.len()))
    }
}

impl From<Vec<Vec<CellValue>>> for Range {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        Self::new(rows)
    }
}

/// An object that can produce its cell values on demand.
///
/// This is the accessor-style counterpart to handing over a raw grid, e.g. a
/// lazily materialized sheet region.
pub trait RangeSource {
    /// Materialize the source's values as rows of cells.
    fn values(&self) -> Vec<Vec<CellValue>>;
}

impl RangeSource for Range {
    fn values(&self) -> Vec<Vec<CellValue>> {
        self.rows.clone()
    }
}

impl<F> RangeSource for F
where
    F: Fn() -> Vec<Vec<CellValue>>,
{
    fn values(&self) -> Vec<Vec<CellValue>> {
        self()
    }
}

/// A range argument as accepted at the call boundary.
///
/// Both variants resolve to a plain [`Range`] before validation runs.
pub enum RangeInput {
    /// A grid of values handed over directly.
    Raw(Vec<Vec<CellValue>>),
    /// An object exposing a value accessor.
    Accessor(Box<dyn RangeSource + Send + Sync>),
}

impl RangeInput {
    /// Wrap an accessor-style source.
    pub fn accessor<S>(source: S) -> Self
    where
        S: RangeSource + Send + Sync + 'static,
    {
        Self::Accessor(Box::new(source))
    }

    /// Resolve to a concrete range.
    #[must_use]
    pub fn resolve(self) -> Range {
        match self {
            Self::Raw(rows) => Range::new(rows),
            Self::Accessor(source) => Range::new(source.values()),
        }
    }
}

impl fmt::Debug for RangeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(rows) => f.debug_tuple("Raw").field(rows).finish(),
            Self::Accessor(_) => f.write_str("Accessor(..)"),
        }
    }
}

impl From<Range> for RangeInput {
    fn from(range: Range) -> Self {
        Self::Raw(range.into_rows())
    }
}

impl From<Vec<Vec<CellValue>>> for RangeInput {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        Self::Raw(rows)
    }
}
