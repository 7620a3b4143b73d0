//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use crate::utils::errors::{MeetSmartError, Result};

/// Format an instant as RFC 3339 with second precision and a `Z` suffix
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render a window as `"<startISO>~<endISO>"`
pub fn format_window_label(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!("{}~{}", format_instant(start), format_instant(end))
}

/// Parse a wall-clock time given as `HH:MM` or `HH:MM:SS`
pub fn parse_wall_clock(text: &str) -> Result<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|_| MeetSmartError::InvalidInput(format!("Invalid time of day: {}", text)))
}

/// Parse a `YYYY-MM-DD HH:MM:SS` local timestamp
pub fn parse_local_datetime(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| MeetSmartError::InvalidInput(format!("Invalid date-time: {}", text)))
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Serde adapter for wall-clock times that accepts `HH:MM` as well as `HH:MM:SS`.
pub mod wall_clock {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_wall_clock(&text).map_err(de::Error::custom)
    }
}
