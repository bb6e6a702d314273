//! Date range filter with inclusive, independently optional bounds.

use crate::traits::Filter;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use records::{Record, field, parse_date};
use serde_json::Value;

/// Keeps records whose date field lies within `[start, end]`.
///
/// An `end` given as a plain date (`2024-03-31`) covers that whole day.
pub struct DateRangeFilter {
    key: String,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRangeFilter {
    pub fn new(
        key: impl Into<String>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            key: key.into(),
            start,
            end,
        }
    }

    /// Build from bounds as entered.
    ///
    /// Bounds that do not parse as dates are dropped. Returns `None` when no
    /// usable bound remains.
    pub fn from_input(key: &str, start: Option<&str>, end: Option<&str>) -> Option<Self> {
        let start = start.and_then(|s| parse_date(&Value::from(s)));
        let end = end.and_then(parse_end_bound);
        if start.is_none() && end.is_none() {
            return None;
        }
        Some(Self::new(key, start, end))
    }
}

fn parse_end_bound(input: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_date(&Value::from(input))?;
    if NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").is_ok() {
        return Some(parsed + TimeDelta::days(1) - TimeDelta::nanoseconds(1));
    }
    Some(parsed)
}

impl Filter for DateRangeFilter {
    fn name(&self) -> &str {
        "DateRangeFilter"
    }

    fn matches(&self, record: &Record) -> bool {
        let Some(value) = field(record, &self.key).and_then(parse_date) else {
            return false;
        };
        self.start.is_none_or(|start| value >= start) && self.end.is_none_or(|end| value <= end)
    }
}
