//! SQL-style joins over two-dimensional ranges.
//!
//! `rangejoin` joins two grids of cells the way `SELECT ... FROM l
//! [INNER|LEFT] JOIN r ON l.a = r.b [AND ...]` would, with spreadsheet-style
//! conveniences: 1-based column numbers, an optional header row, and
//! automatic trimming of trailing blank rows and columns.
//!
//! ```
//! use rangejoin::{Range, sql_join};
//!
//! let left = Range::from_grid([["id", "n"], ["1", "a"], ["2", "b"]]);
//! let right = Range::from_grid([["id", "m"], ["2", "x"], ["3", "y"]]);
//!
//! let joined = sql_join(
//!     Some(left.into()),
//!     Some(right.into()),
//!     Some(1.into()),
//!     Some(1.into()),
//!     Some("inner"),
//!     Some(true),
//! )?
//! .expect("non-degenerate call");
//!
//! assert_eq!(joined, Range::from_grid([["id", "n", "m"], ["2", "b", "x"]]));
//! # Ok::<(), rangejoin::JoinError>(())
//! ```

pub mod request;

pub use rangejoin_engine::{
    JoinMetricsSnapshot, join_metrics_snapshot, reset_join_metrics, trim_range,
};
pub use rangejoin_error::{ErrorFamily, JoinError, Param, Result};
pub use rangejoin_types::{
    CellValue, ColumnArg, JoinSpec, JoinType, Range, RangeInput, RangeSource,
};
pub use request::JoinRequest;

/// Join `left_range` with `right_range` on the given columns.
///
/// Every argument is optional. With all of them absent the call is a blank
/// preview and returns `Ok(None)`. Otherwise a missing range counts as empty
/// and a missing column spec as an empty list; `join_type` defaults to
/// `INNER` and `has_header` to `true`.
///
/// The output is the left columns followed by the right columns minus the
/// right join columns. With a header, the first output row is the combined
/// header.
///
/// # Errors
///
/// The first validation failure, naming the parameter and offending value.
/// No partial output is produced.
pub fn sql_join(
    left_range: Option<RangeInput>,
    right_range: Option<RangeInput>,
    left_columns: Option<ColumnArg>,
    right_columns: Option<ColumnArg>,
    join_type: Option<&str>,
    has_header: Option<bool>,
) -> Result<Option<Range>> {
    JoinRequest {
        left_range,
        right_range,
        left_columns,
        right_columns,
        join_type: join_type.map(str::to_owned),
        has_header,
    }
    .execute()
}
