//! Timestamp type and the clock abstraction.
//!
//! Timestamps are UTC instants with millisecond precision, serialised as
//! RFC 3339 strings (`2099-01-01T00:00:00.000Z`), which is what the browser
//! client produces with `Date.toISOString()`.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::ParseError;

/// A UTC instant, truncated to whole milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let truncated = Utc
            .timestamp_millis_opt(dt.timestamp_millis())
            .single()
            .unwrap_or(dt);
        Self(truncated)
    }

    /// Build a timestamp from Unix epoch milliseconds.
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Parse an RFC 3339 instant, or a bare `YYYY-MM-DD` date taken as midnight UTC.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_datetime(dt.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self::from_datetime(naive.and_utc()))
            .ok_or_else(|| ParseError::InvalidTimestamp(s.to_string()))
    }

    /// The instant `delay` after this one (saturating at the far future).
    pub fn after(&self, delay: Duration) -> Self {
        let millis = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
        Self::from_millis(self.as_millis().saturating_add(millis)).unwrap_or(*self)
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Source of the current time. Injected so tests can control it.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_serialises_with_millis() {
        let ts = Timestamp::parse("2099-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2099-01-01T00:00:00.000Z");
    }

    #[test]
    fn parses_offsets_into_utc() {
        let ts = Timestamp::parse("2030-06-01T12:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2030-06-01T10:00:00.000Z");
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let ts = Timestamp::parse("2099-01-01").unwrap();
        assert_eq!(ts, Timestamp::parse("2099-01-01T00:00:00Z").unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            Timestamp::parse("next tuesday"),
            Err(ParseError::InvalidTimestamp("next tuesday".into()))
        );
    }

    #[test]
    fn sub_millisecond_precision_is_dropped() {
        let ts = Timestamp::parse("2030-01-01T00:00:00.123456Z").unwrap();
        assert_eq!(ts.as_millis() % 1000, 123);
        assert_eq!(ts.to_rfc3339(), "2030-01-01T00:00:00.123Z");
    }

    #[test]
    fn after_adds_delay() {
        let ts = Timestamp::from_millis(1_000).unwrap();
        assert_eq!(ts.after(Duration::from_secs(2)).as_millis(), 3_000);
    }

    #[test]
    fn json_is_a_string() {
        let ts = Timestamp::from_millis(0).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"1970-01-01T00:00:00.000Z\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
