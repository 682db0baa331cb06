use chrono::{DateTime, Utc};

use crate::error::{Result, StoreError};

/// Inclusive time window used by the listing operations.
///
/// A missing `until` means "now"; a missing `from` leaves the window open
/// below. Defaults such as "the last 30 days" are the caller's business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(from: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> Self {
        Self { from, until }
    }

    pub fn between(from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self::new(Some(from), Some(until))
    }

    pub(crate) fn resolve(self, now: DateTime<Utc>) -> Result<Bounds> {
        let until = self.until.unwrap_or(now);
        if let Some(from) = self.from {
            if from > until {
                return Err(StoreError::BadRequest("range start is after its end"));
            }
        }
        Ok(Bounds {
            from: self.from,
            until,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Bounds {
    from: Option<DateTime<Utc>>,
    until: DateTime<Utc>,
}

impl Bounds {
    pub(crate) fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && at <= self.until
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn inverted_range_is_rejected() {
        let now = Utc::now();
        let range = TimeRange::between(now, now - Duration::seconds(1));
        assert_eq!(
            range.resolve(now).unwrap_err(),
            StoreError::BadRequest("range start is after its end")
        );
    }

    #[test]
    fn future_start_without_end_is_rejected() {
        let now = Utc::now();
        let range = TimeRange::new(Some(now + Duration::hours(1)), None);
        assert!(range.resolve(now).is_err());
    }

    #[test]
    fn boundaries_are_inclusive() {
        let now = Utc::now();
        let from = now - Duration::minutes(5);
        let bounds = TimeRange::between(from, now).resolve(now).unwrap();
        assert!(bounds.contains(from));
        assert!(bounds.contains(now));
        assert!(!bounds.contains(now + Duration::nanoseconds(1)));
        assert!(!bounds.contains(from - Duration::nanoseconds(1)));
    }

    #[test]
    fn open_start_accepts_anything_before_end() {
        let now = Utc::now();
        let bounds = TimeRange::default().resolve(now).unwrap();
        assert!(bounds.contains(now - Duration::days(3650)));
        assert!(!bounds.contains(now + Duration::seconds(1)));
    }
}
