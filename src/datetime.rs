//! Timestamp handling for Outseta payloads.
//!
//! Outseta writes timestamps as `2024-01-31T17:45:00` without an offset.
//! Some endpoints add fractional seconds or a `Z`, a few send a bare date,
//! and unset values may arrive as an empty string. Use with
//! `#[serde(default, with = "crate::datetime")]` on `Option<NaiveDateTime>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format used when sending timestamps.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format used for date-only path segments and query values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Write `value` using [`FORMAT`], or `null` when absent.
pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.collect_str(&dt.format(FORMAT)),
        None => serializer.serialize_none(),
    }
}

/// Read a timestamp, treating `null` and empty strings as absent.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}"))),
    }
}

/// Parse any timestamp shape Outseta is known to send.
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
