//! Time utilities: fixed-zone calendar dates for transactions.
//!
//! Every transaction date in a run is taken in one zone. UTC is the
//! default; callers may pick a single IANA zone instead.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Zone used when none is configured
pub const DEFAULT_ZONE: Tz = chrono_tz::UTC;

/// Parse an IANA zone name like "Asia/Kathmandu".
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))
}

/// Calendar date of a backend timestamp in `zone`.
///
/// Accepts RFC 3339 (`2025-04-15T10:00:00.000Z`, explicit offsets), a naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` read as UTC, or a bare `YYYY-MM-DD` which is
/// already a calendar date. Anything else is `None`.
pub fn calendar_date(value: &str, zone: Tz) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&zone).date_naive());
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&ndt).with_timezone(&zone).date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Sortable month key, `YYYY-MM`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Human month label, e.g. "April 2025"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Today's date in `zone`
pub fn today_in(zone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&zone).date_naive()
}
