//! Hour bucket identifiers.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{BucketKeyError, ReferenceZone};

/// Canonical identifier of one instrument's calendar hour in the reference zone.
///
/// Equality, hashing and ordering are field-wise over
/// `(instrument, year, month, day, hour)`. Keys are never derived from
/// formatted text, so `3` and `03` cannot name different buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketKey {
    instrument: String,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
}

impl BucketKey {
    /// Creates a key from already-numeric fields, validating calendar ranges.
    ///
    /// The instrument code is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the instrument is blank, the date does not exist,
    /// or the hour is outside `0..=23`.
    pub fn new(
        instrument: impl Into<String>,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    ) -> Result<Self, BucketKeyError> {
        let instrument = instrument.into();
        let instrument = instrument.trim();
        if instrument.is_empty() {
            return Err(BucketKeyError::EmptyInstrument);
        }
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(BucketKeyError::InvalidDate { year, month, day });
        }
        if hour > 23 {
            return Err(BucketKeyError::InvalidHour(hour));
        }

        Ok(Self {
            instrument: instrument.to_string(),
            year,
            month,
            day,
            hour,
        })
    }

    /// Returns the bucket an instant falls into, for the given instrument.
    ///
    /// The instant is converted to the reference zone and truncated to the
    /// hour there. Both readings of a repeated daylight-saving hour share one
    /// key. The instrument code is trimmed, as in [`BucketKey::new`].
    #[must_use]
    pub fn for_instant(instant: DateTime<Utc>, instrument: &str, zone: &ReferenceZone) -> Self {
        let local = zone.to_local(instant);
        Self {
            instrument: instrument.trim().to_string(),
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
        }
    }

    /// Returns the instrument code.
    #[must_use]
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Returns the year in the reference zone.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12) in the reference zone.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the day of month (1-31) in the reference zone.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Returns the hour (0-23) in the reference zone.
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:04}-{:02}-{:02} {:02}h",
            self.instrument, self.year, self.month, self.day, self.hour
        )
    }
}
