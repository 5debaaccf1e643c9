//! Raw query parameters and their validation.

use hourbar_types::{BucketKey, BucketKeyError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::{QueryError, QueryField};

const YEAR_RANGE: RangeInclusive<i64> = 1..=9999;
const MONTH_RANGE: RangeInclusive<i64> = 1..=12;
const DAY_RANGE: RangeInclusive<i64> = 1..=31;
const HOUR_RANGE: RangeInclusive<i64> = 0..=23;

/// Candle query fields exactly as a caller sent them.
///
/// Every field is optional text so that a missing or non-numeric field is
/// reported as a [`QueryError`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Instrument code.
    pub code: Option<String>,
    /// Calendar year in the reference zone.
    pub year: Option<String>,
    /// Month, `1..=12`.
    pub month: Option<String>,
    /// Day of month.
    pub day: Option<String>,
    /// Hour of day, `0..=23`.
    pub hour: Option<String>,
}

impl QueryParams {
    /// Creates a query with every field set.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        year: impl ToString,
        month: impl ToString,
        day: impl ToString,
        hour: impl ToString,
    ) -> Self {
        Self {
            code: Some(code.into()),
            year: Some(year.to_string()),
            month: Some(month.to_string()),
            day: Some(day.to_string()),
            hour: Some(hour.to_string()),
        }
    }

    /// Validates the fields and builds the bucket key they name.
    ///
    /// Numeric fields are compared as integers, so zero padding is
    /// irrelevant. Fields are checked in order code, year, month, day,
    /// hour; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] naming the first invalid field.
    pub fn to_key(&self) -> Result<BucketKey, QueryError> {
        let code = required(QueryField::Code, self.code.as_deref())?;
        let year = integer(QueryField::Year, self.year.as_deref(), YEAR_RANGE)?;
        let month = integer(QueryField::Month, self.month.as_deref(), MONTH_RANGE)?;
        let day = integer(QueryField::Day, self.day.as_deref(), DAY_RANGE)?;
        let hour = integer(QueryField::Hour, self.hour.as_deref(), HOUR_RANGE)?;

        // The ranges above make these conversions lossless.
        BucketKey::new(code, year as i32, month as u32, day as u32, hour as u32).map_err(
            |error| match error {
                BucketKeyError::EmptyInstrument => QueryError::EmptyInstrument,
                BucketKeyError::InvalidDate { year, month, day } => {
                    QueryError::InvalidDate { year, month, day }
                }
                BucketKeyError::InvalidHour(hour) => QueryError::OutOfRange {
                    field: QueryField::Hour,
                    value: i64::from(hour),
                },
            },
        )
    }
}

fn required(field: QueryField, value: Option<&str>) -> Result<&str, QueryError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        Some(_) if field == QueryField::Code => Err(QueryError::EmptyInstrument),
        _ => Err(QueryError::Missing { field }),
    }
}

fn integer(
    field: QueryField,
    value: Option<&str>,
    range: RangeInclusive<i64>,
) -> Result<i64, QueryError> {
    let text = required(field, value)?;
    let value: i64 = text.parse().map_err(|_| QueryError::NotAnInteger {
        field,
        value: text.to_string(),
    })?;
    if !range.contains(&value) {
        return Err(QueryError::OutOfRange { field, value });
    }
    Ok(value)
}
