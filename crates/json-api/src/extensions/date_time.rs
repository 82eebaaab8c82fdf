//! Date-time parsing for query strings and request bodies.

use jiff::{Timestamp, civil::DateTime, tz::TimeZone};

/// Parse an ISO-8601 date-time.
///
/// Values with an offset (`2026-03-01T10:00:00Z`, `...+01:00`) are taken as
/// given. Values without one (`2026-03-01T10:00:00`) are read as UTC.
pub(crate) fn parse_date_time(value: &str) -> Option<Timestamp> {
    let value = value.trim();

    value.parse::<Timestamp>().ok().or_else(|| {
        value
            .parse::<DateTime>()
            .ok()
            .and_then(|civil| civil.to_zoned(TimeZone::UTC).ok())
            .map(|zoned| zoned.timestamp())
    })
}
