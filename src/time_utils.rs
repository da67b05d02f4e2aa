// SPDX-License-Identifier: MIT

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Date format accepted in query parameters (`2019-03-20T08:29:49Z`).
const QUERY_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a query-parameter date into a UTC timestamp.
pub fn parse_query_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, QUERY_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}
