//! Date/time utilities for VDRIVE.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC datetime as an RFC3339 string for API responses.
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}
