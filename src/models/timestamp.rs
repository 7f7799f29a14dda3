// file: src/models/timestamp.rs
// description: Incident timestamps that keep track of whether an offset was given
// reference: https://docs.rs/chrono

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A point in time from the incident record.
///
/// Offset-less input is ordered as UTC but keeps its offset-less form when
/// written back out, so a JSON snapshot re-validates to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<FixedOffset>,
    has_offset: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParseError(String);

impl fmt::Display for TimestampParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid datetime '{}'", self.0)
    }
}

impl std::error::Error for TimestampParseError {}

impl Timestamp {
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }

    pub fn has_offset(&self) -> bool {
        self.has_offset
    }

    /// Whole minutes from `self` to `later`; negative when `later` is earlier.
    pub fn minutes_until(&self, later: &Timestamp) -> i64 {
        (later.instant() - self.instant()).num_minutes()
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self {
                instant,
                has_offset: true,
            });
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(|naive| Self {
                instant: naive.and_utc().fixed_offset(),
                has_offset: false,
            })
            .ok_or_else(|| TimestampParseError(s.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_offset {
            f.write_str(&self.instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        } else {
            write!(
                f,
                "{}",
                self.instant.naive_utc().format("%Y-%m-%dT%H:%M:%S%.f")
            )
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
