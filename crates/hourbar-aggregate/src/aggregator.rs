//! Full-pass tick-to-candle aggregation.

use hourbar_source::parse_record;
use hourbar_types::{CandleTable, RawRecord, ReferenceZone, Tick};

use crate::{AggregateStats, Aggregation};

/// Number of malformed records logged individually per pass.
const LOGGED_SKIPS: usize = 5;

/// Aggregates a complete record set into hour candles.
///
/// Every pass starts from an empty table; an aggregator never patches a
/// previous result.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickAggregator {
    zone: ReferenceZone,
}

impl TickAggregator {
    /// Creates an aggregator that buckets in the given zone.
    #[must_use]
    pub const fn new(zone: ReferenceZone) -> Self {
        Self { zone }
    }

    /// Returns the reference zone used for bucketing.
    #[must_use]
    pub const fn zone(&self) -> ReferenceZone {
        self.zone
    }

    /// Parses and aggregates raw records.
    ///
    /// Records that fail to parse are skipped and counted in
    /// [`AggregateStats::skipped`]; they never abort the pass.
    pub fn aggregate_records<I>(&self, records: I) -> Aggregation
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut stats = AggregateStats::default();
        let mut ticks = Vec::new();

        for record in records {
            stats.records += 1;
            match parse_record(&record, &self.zone) {
                Ok(tick) => ticks.push(tick),
                Err(error) => {
                    stats.skipped += 1;
                    if stats.skipped <= LOGGED_SKIPS {
                        tracing::debug!(%error, ?record, "Skipping malformed record");
                    }
                }
            }
        }

        if stats.skipped > LOGGED_SKIPS {
            tracing::debug!(
                unlogged = stats.skipped - LOGGED_SKIPS,
                "Further malformed records skipped"
            );
        }

        stats.ticks = ticks.len();
        let table = self.aggregate(ticks);
        stats.buckets = table.len();

        Aggregation { table, stats }
    }

    /// Aggregates parsed ticks.
    ///
    /// Ticks are stably sorted by instant first, so `close` is the
    /// chronologically last price of each bucket and ties keep input order.
    #[must_use]
    pub fn aggregate(&self, mut ticks: Vec<Tick>) -> CandleTable {
        ticks.sort_by_key(|tick| tick.instant);

        let mut table = CandleTable::new();
        for tick in ticks {
            let key = tick.bucket_key(&self.zone);
            table.record(key, tick.price);
        }
        table
    }
}
