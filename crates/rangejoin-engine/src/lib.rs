//! Join engine: range trimming, fail-fast validation, composite keys and
//! the two-phase hash join.
//!
//! The pipeline for one call is `validate_join` (which trims both ranges)
//! followed by `hash_join`. Nothing outlives the call except the
//! process-wide counters in [`instrumentation`].

pub mod hash_join;
pub mod instrumentation;
pub mod key;
pub mod trim;
pub mod validate;

pub use hash_join::{HashJoinTable, execute_join, hash_join, hash_join_build, hash_join_probe};
pub use instrumentation::{JoinMetricsSnapshot, join_metrics_snapshot, reset_join_metrics};
pub use key::{CompositeKey, KEY_SEPARATOR, build_key};
pub use trim::trim_range;
pub use validate::{
    ColumnSpec, ValidatedJoin, validate_column_specs, validate_join, validate_join_type,
    validate_ranges,
};
