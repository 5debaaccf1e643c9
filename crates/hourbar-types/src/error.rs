//! Error types for hourbar.

use thiserror::Error;

/// Errors produced while turning one raw record into a [`Tick`](crate::Tick).
///
/// A parse error only ever concerns a single record. Aggregation skips and
/// counts such records instead of failing the whole pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required field was absent or blank.
    #[error("Missing {0} field")]
    MissingField(&'static str),

    /// The instrument code was empty.
    #[error("Empty instrument code")]
    EmptyInstrument,

    /// The timestamp text did not match any accepted layout.
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// The price was not an integer.
    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),

    /// The wall-clock time falls into a daylight-saving gap of the zone.
    #[error("Local time {value:?} does not exist in {zone}")]
    NonexistentLocalTime {
        /// The timestamp text after zone stripping.
        value: String,
        /// The reference zone name.
        zone: &'static str,
    },
}

/// Errors for bucket keys built from out-of-range fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BucketKeyError {
    /// The instrument code was empty.
    #[error("Empty instrument code")]
    EmptyInstrument,

    /// Year, month and day do not name a calendar date.
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// The year.
        year: i32,
        /// The month.
        month: u32,
        /// The day of month.
        day: u32,
    },

    /// Hour outside `0..=23`.
    #[error("Invalid hour: {0}")]
    InvalidHour(u32),
}

/// Error for unknown time zone names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    /// The name is not a known IANA time zone.
    #[error("Unknown time zone: {0:?}")]
    Unknown(String),
}
