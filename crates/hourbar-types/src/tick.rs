//! Tick data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BucketKey, ReferenceZone};

/// A single trade tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Absolute time of the trade.
    pub instant: DateTime<Utc>,
    /// Instrument code (never empty).
    pub instrument: String,
    /// Trade price in integer units.
    pub price: i64,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub fn new(instant: DateTime<Utc>, instrument: impl Into<String>, price: i64) -> Self {
        Self {
            instant,
            instrument: instrument.into(),
            price,
        }
    }

    /// Returns the hour bucket this tick belongs to.
    #[must_use]
    pub fn bucket_key(&self, zone: &ReferenceZone) -> BucketKey {
        BucketKey::for_instant(self.instant, &self.instrument, zone)
    }
}

/// Raw record as read from the source (before parsing).
///
/// The source lays records out as `time,code,price` text columns. Missing
/// columns are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Timestamp text, possibly carrying a zone annotation.
    pub timestamp: String,
    /// Instrument code text.
    pub instrument: String,
    /// Price text.
    pub price: String,
}

impl RawRecord {
    /// Creates a new raw record.
    #[must_use]
    pub fn new(
        timestamp: impl Into<String>,
        instrument: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            instrument: instrument.into(),
            price: price.into(),
        }
    }
}
