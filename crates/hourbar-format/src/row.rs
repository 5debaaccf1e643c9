//! Flat candle rows.

use hourbar_types::{BucketKey, Candle, CandleTable};
use serde::Serialize;

/// One table entry flattened for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandleRow<'a> {
    /// Instrument code.
    pub instrument: &'a str,
    /// Year in the reference zone.
    pub year: i32,
    /// Month.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Hour of day.
    pub hour: u32,
    /// First trade price.
    pub open: i64,
    /// Highest trade price.
    pub high: i64,
    /// Lowest trade price.
    pub low: i64,
    /// Last trade price.
    pub close: i64,
}

impl<'a> CandleRow<'a> {
    /// Flattens one key and its candle.
    #[must_use]
    pub fn new(key: &'a BucketKey, candle: &Candle) -> Self {
        Self {
            instrument: key.instrument(),
            year: key.year(),
            month: key.month(),
            day: key.day(),
            hour: key.hour(),
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
        }
    }

    /// Flattens a whole table in key order.
    #[must_use]
    pub fn from_table(table: &'a CandleTable) -> Vec<Self> {
        table
            .sorted()
            .into_iter()
            .map(|(key, candle)| Self::new(key, candle))
            .collect()
    }
}
