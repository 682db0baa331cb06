use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use parley_db::TimeRange;
use parley_types::api::RangeQuery;

use crate::error::ApiError;

pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;
pub const DEFAULT_LIMIT: usize = 100;

/// Resolved listing parameters: a closed time range and a result cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub range: TimeRange,
    pub limit: usize,
}

impl Window {
    /// Missing values fall back to the last 30 days and 100 results.
    /// Empty strings count as missing.
    pub fn from_query(query: &RangeQuery, now: DateTime<Utc>) -> Result<Self, ApiError> {
        let from = match present(&query.start) {
            Some(value) => parse_instant("start", value)?,
            None => now - Duration::days(DEFAULT_LOOKBACK_DAYS),
        };
        let until = match present(&query.until) {
            Some(value) => parse_instant("until", value)?,
            None => now,
        };
        let limit = match present(&query.limit) {
            Some(value) => value.parse().map_err(|_| ApiError::InvalidQuery {
                param: "limit",
                value: value.to_string(),
            })?,
            None => DEFAULT_LIMIT,
        };

        Ok(Self {
            range: TimeRange::between(from, until),
            limit,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Accepts a bare date (midnight UTC) or a full RFC 3339 timestamp.
fn parse_instant(param: &'static str, value: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ApiError::InvalidQuery {
            param,
            value: value.to_string(),
        })
}
