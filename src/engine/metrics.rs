//! Scan metrics.
//!
//! Counters collected while a [`super::Scan`] runs. They are cheap enough to
//! keep on the hot path and are surfaced by [`crate::scan_verbose_with`] and
//! the CLI report.

use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanMetrics {
    /// Wall time from the creation of the scan to the snapshot.
    pub total: Duration,
    /// Word starts the scan could try.
    pub candidates: usize,
    /// Start positions actually tried (the rest were inside earlier matches).
    pub attempts: usize,
    pub matches: usize,
    /// Attempts abandoned because they ran out of production steps.
    pub exhausted: usize,
    /// Level productions evaluated, memo hits excluded.
    pub steps: usize,
    pub memo_hits: usize,
}
