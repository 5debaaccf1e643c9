//! Published candle table snapshots.

use chrono::{DateTime, Utc};
use hourbar_aggregate::{AggregateStats, Aggregation};
use hourbar_types::{BucketKey, Candle, CandleTable};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// One complete, immutable candle table as published by a rebuild.
#[derive(Debug)]
pub struct Snapshot {
    table: CandleTable,
    stats: AggregateStats,
    built_at: DateTime<Utc>,
    built_instant: Instant,
    generation: u64,
}

impl Snapshot {
    pub(crate) fn new(aggregation: Aggregation, generation: u64) -> Self {
        Self {
            table: aggregation.table,
            stats: aggregation.stats,
            built_at: Utc::now(),
            built_instant: Instant::now(),
            generation,
        }
    }

    /// Looks up a bucket.
    #[must_use]
    pub fn get(&self, key: &BucketKey) -> Option<Candle> {
        self.table.get(key).copied()
    }

    /// Returns the candle table.
    #[must_use]
    pub const fn table(&self) -> &CandleTable {
        &self.table
    }

    /// Returns the statistics of the pass that built this snapshot.
    #[must_use]
    pub const fn stats(&self) -> AggregateStats {
        self.stats
    }

    /// Returns the wall-clock time at which the rebuild completed.
    #[must_use]
    pub const fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Returns the time elapsed since the rebuild completed.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.built_instant.elapsed()
    }

    /// Returns the rebuild sequence number (1 for the first table).
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Lifecycle state of a candle store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreState {
    /// No table has been published and no rebuild is running.
    Empty,
    /// A rebuild is in flight. A previous table may still be served.
    Building,
    /// A table is published and no rebuild is running.
    Ready,
}

impl StoreState {
    /// Returns the state as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Building => "building",
            Self::Ready => "ready",
        }
    }
}

impl std::fmt::Display for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
