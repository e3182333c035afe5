//! Core type definitions shared by the rangejoin crates.

pub mod range;
pub mod spec;
pub mod value;

pub use range::{Range, RangeInput, RangeSource};
pub use spec::{ColumnArg, JoinSpec, JoinType};
pub use value::CellValue;
