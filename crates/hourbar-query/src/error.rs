//! Query error types.

use hourbar_store::{RefreshError, StoreError};
use thiserror::Error;

/// A field of a candle query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    /// Instrument code.
    Code,
    /// Calendar year.
    Year,
    /// Calendar month.
    Month,
    /// Day of month.
    Day,
    /// Hour of day.
    Hour,
}

impl QueryField {
    /// Returns the field's parameter name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

impl std::fmt::Display for QueryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Malformed query parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A required field was absent or blank.
    #[error("Missing query parameter '{field}'")]
    Missing {
        /// The missing field.
        field: QueryField,
    },

    /// A numeric field did not parse as an integer.
    #[error("Query parameter '{field}' is not an integer: '{value}'")]
    NotAnInteger {
        /// The offending field.
        field: QueryField,
        /// The text as received.
        value: String,
    },

    /// A numeric field is outside its calendar range.
    #[error("Query parameter '{field}' is out of range: {value}")]
    OutOfRange {
        /// The offending field.
        field: QueryField,
        /// The parsed value.
        value: i64,
    },

    /// The instrument code is blank after trimming.
    #[error("Instrument code must not be empty")]
    EmptyInstrument,

    /// The fields are in range but do not name a calendar date.
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year.
        year: i32,
        /// Month.
        month: u32,
        /// Day.
        day: u32,
    },
}

/// Errors returned by [`Resolver::resolve`](crate::Resolver::resolve).
///
/// A well-formed query with no matching bucket is not an error; see
/// [`Resolution::NotFound`](crate::Resolution::NotFound).
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// The query was rejected before reaching the store.
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    /// No candle table could be built to answer the query.
    #[error("Candle data unavailable: {0}")]
    Unavailable(#[source] RefreshError),
}

impl From<StoreError> for ResolveError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(cause) => Self::Unavailable(cause),
        }
    }
}
