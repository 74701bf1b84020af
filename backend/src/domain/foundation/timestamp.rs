//! UTC instants used for conference bookkeeping and token lifetimes.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A UTC instant. Serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps a value read back from storage.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// True when `self` is strictly later than `other`.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Out-of-range values collapse to the Unix epoch.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }

    /// Seconds since the epoch, as carried in JWT `iat`/`exp` claims.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Returns `self`, or one millisecond past `previous` when `self` does not
    /// come strictly after it.
    ///
    /// Mutations use this so `updated_at` always moves forward, even when two
    /// writes land inside the same clock tick.
    pub fn strictly_after(self, previous: &Timestamp) -> Self {
        if self.0 > previous.0 {
            self
        } else {
            Self(previous.0 + Duration::milliseconds(1))
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
