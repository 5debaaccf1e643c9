//! Raw record parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use hourbar_types::{ParseError, RawRecord, ReferenceZone, Tick};

/// Accepted layouts for the date part.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Accepted layouts for the clock part. `%.f` also matches no fraction.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parses one raw record into a tick.
///
/// The timestamp is normalized with [`parse_timestamp`], the instrument is
/// trimmed and must be non-empty, and the price must be an integer.
///
/// # Errors
///
/// Returns the first field-level [`ParseError`] found.
pub fn parse_record(record: &RawRecord, zone: &ReferenceZone) -> Result<Tick, ParseError> {
    let instrument = record.instrument.trim();
    if instrument.is_empty() {
        return Err(ParseError::EmptyInstrument);
    }

    let instant = parse_timestamp(&record.timestamp, zone)?;
    let price = parse_price(&record.price)?;

    Ok(Tick::new(instant, instrument, price))
}

/// Parses an integer price.
///
/// # Errors
///
/// Returns an error if the text is blank or not an integer.
pub fn parse_price(text: &str) -> Result<i64, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::MissingField("price"));
    }
    text.parse()
        .map_err(|_| ParseError::InvalidPrice(text.to_string()))
}

/// Normalizes timestamp text into an absolute instant.
///
/// Any zone annotation is dropped (see [`strip_zone_annotation`]) and the
/// remaining wall-clock fields are read as local time in `zone`. The
/// annotation is never used to pick a zone.
///
/// # Errors
///
/// Returns an error if the text is blank, matches no accepted layout, or
/// names a wall-clock time skipped by a daylight-saving transition.
pub fn parse_timestamp(text: &str, zone: &ReferenceZone) -> Result<DateTime<Utc>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::MissingField("timestamp"));
    }

    let local = strip_zone_annotation(text)
        .and_then(parse_wall_clock)
        .ok_or_else(|| ParseError::InvalidTimestamp(text.to_string()))?;

    zone.localize(&local)
        .ok_or_else(|| ParseError::NonexistentLocalTime {
            value: local.to_string(),
            zone: zone.name(),
        })
}

/// Returns the wall-clock prefix of a timestamp, without its zone annotation.
///
/// The wall clock is a date, a `T` or blank separator, and a clock made of
/// digits, `:` and `.`. Whatever follows must be a zone marker: `Z`, a
/// numeric offset such as `+09:00`, an uppercase abbreviation such as `KST`
/// or `GMT+0900`, or an IANA name such as `Asia/Seoul`, optionally followed
/// by a parenthesized zone description.
///
/// Returns `None` if the text has no separator or the trailer is not a zone
/// marker. `AM`/`PM` are not zone markers.
#[must_use]
pub fn strip_zone_annotation(text: &str) -> Option<&str> {
    let text = text.trim();
    let sep = text.find(['T', ' ', '\t'])?;

    let rest = &text[sep + 1..];
    let clock_start = sep + 1 + (rest.len() - rest.trim_start().len());
    let clock = &text[clock_start..];
    let clock_len = clock
        .find(|c: char| !(c.is_ascii_digit() || c == ':' || c == '.'))
        .unwrap_or(clock.len());
    let end = clock_start + clock_len;

    is_zone_annotation(&text[end..]).then_some(&text[..end])
}

fn is_zone_annotation(trailer: &str) -> bool {
    let trailer = trailer.trim();
    let (marker, description) = trailer.find('(').map_or((trailer, None), |open| {
        (trailer[..open].trim_end(), Some(&trailer[open..]))
    });

    if let Some(description) = description {
        let Some(inner) = description
            .strip_prefix('(')
            .and_then(|d| d.strip_suffix(')'))
        else {
            return false;
        };
        if !inner.chars().all(|c| {
            c.is_ascii_alphanumeric() || c == ' ' || matches!(c, '+' | '-' | ':' | '/' | '_' | '.')
        }) {
            return false;
        }
    }

    marker.is_empty() || is_zone_marker(marker)
}

fn is_zone_marker(token: &str) -> bool {
    if is_offset(token) {
        return true;
    }

    let (name, offset) = token
        .find(['+', '-'])
        .map_or((token, ""), |at| token.split_at(at));
    let abbreviation = name == "Z"
        || ((2..=5).contains(&name.len())
            && name.bytes().all(|b| b.is_ascii_uppercase())
            && !matches!(name, "AM" | "PM"));
    if abbreviation && (offset.is_empty() || is_offset(offset)) {
        return true;
    }

    token.contains('/') && token.parse::<ReferenceZone>().is_ok()
}

/// `+9`, `+0900`, `-05:00` and the like.
fn is_offset(text: &str) -> bool {
    let Some(digits) = text.strip_prefix(['+', '-']) else {
        return false;
    };
    match digits.split_once(':') {
        Some((hours, minutes)) => {
            hours.len() == 2
                && minutes.len() == 2
                && hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit())
        }
        None => (1..=4).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()),
    }
}

fn parse_wall_clock(text: &str) -> Option<NaiveDateTime> {
    let (date, clock) = text.split_once(['T', ' ', '\t'])?;
    let clock = clock.trim();

    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(clock, fmt).ok())?;

    Some(NaiveDateTime::new(date, time))
}
