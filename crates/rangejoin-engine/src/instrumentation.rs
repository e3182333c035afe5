//! Join observability counters.
//!
//! Lightweight process-local counters for the `hash_join` tracing lane.
//! They are updated with relaxed atomics and never influence join results.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of join observability metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinMetricsSnapshot {
    /// Joins that ran to completion.
    pub rangejoin_joins_total: u64,
    /// Calls rejected by validation.
    pub rangejoin_validation_failures_total: u64,
    /// Right-side data rows inserted into a hash index.
    pub rangejoin_right_rows_indexed_total: u64,
    /// Left-side data rows probed against a hash index.
    pub rangejoin_left_rows_probed_total: u64,
    /// Data rows emitted (header rows excluded).
    pub rangejoin_rows_emitted_total: u64,
    /// Emitted rows padded with NULLs by a LEFT join.
    pub rangejoin_null_padded_rows_total: u64,
}

static JOINS_TOTAL: AtomicU64 = AtomicU64::new(0);
static VALIDATION_FAILURES_TOTAL: AtomicU64 = AtomicU64::new(0);
static RIGHT_ROWS_INDEXED_TOTAL: AtomicU64 = AtomicU64::new(0);
static LEFT_ROWS_PROBED_TOTAL: AtomicU64 = AtomicU64::new(0);
static ROWS_EMITTED_TOTAL: AtomicU64 = AtomicU64::new(0);
static NULL_PADDED_ROWS_TOTAL: AtomicU64 = AtomicU64::new(0);

fn as_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

pub(crate) fn record_validation_failure() {
    VALIDATION_FAILURES_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_build(rows_indexed: usize) {
    RIGHT_ROWS_INDEXED_TOTAL.fetch_add(as_u64(rows_indexed), Ordering::Relaxed);
}

pub(crate) fn record_probe(rows_probed: usize, rows_emitted: usize, null_padded: usize) {
    LEFT_ROWS_PROBED_TOTAL.fetch_add(as_u64(rows_probed), Ordering::Relaxed);
    ROWS_EMITTED_TOTAL.fetch_add(as_u64(rows_emitted), Ordering::Relaxed);
    NULL_PADDED_ROWS_TOTAL.fetch_add(as_u64(null_padded), Ordering::Relaxed);
}

pub(crate) fn record_join_completed() {
    JOINS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

/// Return a snapshot of join counters.
#[must_use]
pub fn join_metrics_snapshot() -> JoinMetricsSnapshot {
    JoinMetricsSnapshot {
        rangejoin_joins_total: JOINS_TOTAL.load(Ordering::Relaxed),
        rangejoin_validation_failures_total: VALIDATION_FAILURES_TOTAL.load(Ordering::Relaxed),
        rangejoin_right_rows_indexed_total: RIGHT_ROWS_INDEXED_TOTAL.load(Ordering::Relaxed),
        rangejoin_left_rows_probed_total: LEFT_ROWS_PROBED_TOTAL.load(Ordering::Relaxed),
        rangejoin_rows_emitted_total: ROWS_EMITTED_TOTAL.load(Ordering::Relaxed),
        rangejoin_null_padded_rows_total: NULL_PADDED_ROWS_TOTAL.load(Ordering::Relaxed),
    }
}

/// Reset all join counters.
pub fn reset_join_metrics() {
    JOINS_TOTAL.store(0, Ordering::Relaxed);
    VALIDATION_FAILURES_TOTAL.store(0, Ordering::Relaxed);
    RIGHT_ROWS_INDEXED_TOTAL.store(0, Ordering::Relaxed);
    LEFT_ROWS_PROBED_TOTAL.store(0, Ordering::Relaxed);
    ROWS_EMITTED_TOTAL.store(0, Ordering::Relaxed);
    NULL_PADDED_ROWS_TOTAL.store(0, Ordering::Relaxed);
}
