//! # Temporal Types: UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC timestamp truncated to seconds. Expiry windows
//! are specified to the second ("30 days and 1 second is outside the
//! window"), so sub-second precision would only add noise to comparisons
//! and to serialized output.
//!
//! Serialized form is always `YYYY-MM-DDTHH:MM:SSZ`. Deserialization is
//! lenient: any RFC 3339 offset is converted to UTC, and a bare
//! `YYYY-MM-DD` date means midnight UTC on that day, which is how the
//! document-review workflow records most expiry dates.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EvopsError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`]: strict RFC 3339 with `Z` suffix.
/// - [`Timestamp::parse_lenient()`]: RFC 3339 with any offset.
/// - [`Timestamp::parse_date_or_datetime()`]: lenient, or a bare date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 timestamp, accepting only the `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`EvopsError::InvalidTimestamp`] if the string is not valid
    /// RFC 3339 or carries an explicit offset (even `+00:00`).
    pub fn parse(s: &str) -> Result<Self, EvopsError> {
        if !s.ends_with('Z') {
            return Err(EvopsError::InvalidTimestamp(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        Self::parse_lenient(s)
    }

    /// Parse an RFC 3339 timestamp with any offset, converting to UTC.
    pub fn parse_lenient(s: &str) -> Result<Self, EvopsError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| EvopsError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Parse either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
    ///
    /// A bare date is interpreted as midnight UTC at the start of that day.
    pub fn parse_date_or_datetime(s: &str) -> Result<Self, EvopsError> {
        let s = s.trim();
        if let Ok(ts) = Self::parse_lenient(s) {
            return Ok(ts);
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| EvopsError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| EvopsError::InvalidTimestamp(format!("{s:?}: no midnight")))?;
        Ok(Self(midnight.and_utc()))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, EvopsError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| EvopsError::InvalidTimestamp(format!("unix timestamp {secs} out of range")))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Add a signed duration. Returns `None` on overflow.
    pub fn checked_add(&self, delta: Duration) -> Option<Self> {
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Add whole days. Returns `None` on overflow.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        Duration::try_days(days).and_then(|d| self.checked_add(d))
    }

    /// `self - earlier` as a signed duration.
    pub fn signed_duration_since(&self, earlier: &Timestamp) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl TryFrom<String> for Timestamp {
    type Error = EvopsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_date_or_datetime(&value)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_iso8601()
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
