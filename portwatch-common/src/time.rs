//! Timestamp utilities

use chrono::{DateTime, NaiveDateTime, Utc};

/// Sort key used for records whose timestamp is missing or unreadable
pub const EPOCH_MILLIS: i64 = 0;

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC time formatted for storage (RFC 3339, millisecond precision)
pub fn now_rfc3339() -> String {
    now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Parse a stored timestamp into Unix milliseconds
///
/// Accepts RFC 3339 as well as SQLite's `CURRENT_TIMESTAMP` layout
/// (`YYYY-MM-DD HH:MM:SS`, interpreted as UTC). Anything else, including
/// `None`, maps to [`EPOCH_MILLIS`] so it sorts as the oldest possible value.
pub fn parse_timestamp_millis(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return EPOCH_MILLIS;
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp_millis();
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or(EPOCH_MILLIS)
}
