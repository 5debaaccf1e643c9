//! Aggregation results.

use hourbar_types::CandleTable;
use serde::{Deserialize, Serialize};

/// Counters for one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Records read from the source.
    pub records: usize,
    /// Records that parsed into ticks.
    pub ticks: usize,
    /// Records skipped because they failed to parse.
    pub skipped: usize,
    /// Distinct buckets in the resulting table.
    pub buckets: usize,
}

/// Output of one complete aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// The candle table.
    pub table: CandleTable,
    /// Counters for the pass.
    pub stats: AggregateStats,
}
