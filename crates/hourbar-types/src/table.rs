//! Candle table produced by one aggregation pass.

use std::collections::HashMap;

use crate::{BucketKey, Candle};

/// Mapping from bucket to candle.
///
/// A table is built by one aggregation pass and then shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandleTable {
    candles: HashMap<BucketKey, Candle>,
}

impl CandleTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` buckets.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            candles: HashMap::with_capacity(capacity),
        }
    }

    /// Applies one trade to its bucket.
    ///
    /// The first trade opens the candle; later trades widen high/low and
    /// move the close.
    pub fn record(&mut self, key: BucketKey, price: i64) {
        self.candles
            .entry(key)
            .and_modify(|candle| candle.update(price))
            .or_insert_with(|| Candle::from_price(price));
    }

    /// Looks up the candle of a bucket.
    #[must_use]
    pub fn get(&self, key: &BucketKey) -> Option<&Candle> {
        self.candles.get(key)
    }

    /// Returns the number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Returns true if the table has no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Returns all buckets in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &Candle)> {
        self.candles.iter()
    }

    /// Returns all buckets sorted by key.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&BucketKey, &Candle)> {
        let mut entries: Vec<_> = self.candles.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl FromIterator<(BucketKey, Candle)> for CandleTable {
    fn from_iter<I: IntoIterator<Item = (BucketKey, Candle)>>(iter: I) -> Self {
        Self {
            candles: iter.into_iter().collect(),
        }
    }
}
