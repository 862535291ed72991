//! Time parsing and formatting lens
//!
//! This module turns free-form date/time text given on the command line into
//! the `YYYY-MM-DDTHH:MM:SS` form the event service expects. It supports
//! plain dates, date-times, RFC3339 strings, Unix timestamps and the other
//! human-readable formats understood by `dateparser`.
//!
//! # Feature Requirements
//!
//! This module requires the `lens-core` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use seisquery::lens::time::TimeLens;
//!
//! let lens = TimeLens::new();
//! let start = lens.parse_time_string("2016-01-01")?;
//! assert_eq!(lens.format_query_time(&start), "2016-01-01T00:00:00");
//! ```

use anyhow::anyhow;
use chrono::{DateTime, NaiveTime, Utc};

/// strftime pattern of the `start`/`end` query parameters
pub const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Time parsing and formatting lens
///
/// Naive inputs (no offset given) are read as UTC. Inputs without a time of
/// day fall on midnight.
pub struct TimeLens;

impl TimeLens {
    /// Create a new time lens
    pub fn new() -> Self {
        Self
    }

    /// Parse a single time string into a `DateTime<Utc>`
    ///
    /// Accepts:
    /// - Dates (e.g., "2016-01-01")
    /// - Date-times (e.g., "2016-01-01 12:30:00")
    /// - RFC3339 strings (e.g., "2016-01-01T12:30:00Z")
    /// - Unix timestamps (e.g., "1451606400")
    /// - Human-readable dates (e.g., "January 1, 2016")
    pub fn parse_time_string(&self, time_string: &str) -> anyhow::Result<DateTime<Utc>> {
        let midnight =
            NaiveTime::from_hms_opt(0, 0, 0).ok_or_else(|| anyhow!("Failed to create time"))?;

        dateparser::parse_with(time_string.trim(), &Utc, midnight).map_err(|_| {
            anyhow!(
                "unrecognized date/time; use e.g. YYYY-MM-DD or \"YYYY-MM-DD HH:MM:SS\""
            )
        })
    }

    /// Render an instant the way the event service expects it
    pub fn format_query_time(&self, time: &DateTime<Utc>) -> String {
        time.format(QUERY_TIME_FORMAT).to_string()
    }
}

impl Default for TimeLens {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
