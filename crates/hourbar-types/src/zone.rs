//! Reference time zone definitions.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::ZoneError;

/// The single fixed time zone in which hour buckets are defined.
///
/// Both the aggregation path and the query path receive the same zone
/// explicitly. Nothing in hourbar consults the process's local time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceZone(Tz);

impl ReferenceZone {
    /// IANA name of the default zone.
    pub const DEFAULT_NAME: &'static str = "Asia/Seoul";

    /// Creates a reference zone from a `chrono-tz` zone.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the underlying `chrono-tz` zone.
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// Returns the IANA name of the zone.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Interprets a wall-clock reading as local time in this zone.
    ///
    /// A reading repeated by a daylight-saving fall-back resolves to the
    /// earlier instant. Returns `None` for readings skipped by a
    /// spring-forward gap.
    #[must_use]
    pub fn localize(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self.0.from_local_datetime(local) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => None,
        }
    }

    /// Converts an absolute instant to local time in this zone.
    #[must_use]
    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.0)
    }
}

impl Default for ReferenceZone {
    fn default() -> Self {
        Self(chrono_tz::Asia::Seoul)
    }
}

impl std::fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ReferenceZone {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| ZoneError::Unknown(s.to_string()))
    }
}
