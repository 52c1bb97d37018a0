use crate::types::constant::{ARCHIVE_OBJECT_EXTENSION, UNKNOWN_EXECUTION};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;
use tracing::warn;
use uuid::Uuid;

/// Storage key of one archived record:
/// `<prefix>/<YYYY-MM-DD>/<execution-arn-or-unknown>-<token>.json`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchivalKey(String);

impl ArchivalKey {
    pub fn new(prefix: &str, date: NaiveDate, execution_arn: Option<&str>, token: Uuid) -> Self {
        let execution = execution_arn.filter(|arn| !arn.is_empty()).unwrap_or(UNKNOWN_EXECUTION);
        Self(format!("{}/{}/{}-{}.{}", prefix, date.format("%Y-%m-%d"), execution, token, ARCHIVE_OBJECT_EXTENSION))
    }

    /// Build a key with a fresh random token. Keys are never reused, even for identical records.
    pub fn generate(prefix: &str, date: NaiveDate, execution_arn: Option<&str>) -> Self {
        Self::new(prefix, date, execution_arn, Uuid::new_v4())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchivalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArchivalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// UTC calendar date a record is filed under: the date its event time names,
/// otherwise `now`.
pub fn archive_date(time: Option<&str>, now: DateTime<Utc>) -> NaiveDate {
    match time {
        Some(time) => parse_event_date(time).unwrap_or_else(|| {
            warn!(time = %time, "Unparseable record time, filing under current date");
            now.date_naive()
        }),
        None => now.date_naive(),
    }
}

/// RFC 3339 first, then ISO 8601 variants. Values without an offset are UTC.
fn parse_event_date(time: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(time) {
        return Some(parsed.with_timezone(&Utc).date_naive());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc().date_naive());
    }
    if let Ok(parsed) = DateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(time, "%Y-%m-%d").ok()
}
