//! Numeric range filter with independently optional bounds.

use crate::traits::Filter;
use records::{Record, as_number, field};

/// Keeps records whose numeric field lies within `[min, max]`.
///
/// ## Algorithm
/// 1. Read the field as a number (numeric strings included)
/// 2. Records without a numeric value are dropped
/// 3. Check `value >= min` if min is set and `value <= max` if max is set
pub struct RangeFilter {
    key: String,
    min: Option<f64>,
    max: Option<f64>,
}

impl RangeFilter {
    pub fn new(key: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            key: key.into(),
            min,
            max,
        }
    }
}

impl Filter for RangeFilter {
    fn name(&self) -> &str {
        "RangeFilter"
    }

    fn matches(&self, record: &Record) -> bool {
        let Some(value) = field(record, &self.key).and_then(as_number) else {
            return false;
        };
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn balances() -> Vec<Record> {
        [json!(10), json!("50"), json!(75.5), json!(100), json!("n/a")]
            .into_iter()
            .map(|b| serde_json::from_value(json!({"balance": b})).unwrap())
            .collect()
    }

    fn kept(filter: &RangeFilter) -> Vec<usize> {
        balances()
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(r))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_min_only() {
        assert_eq!(kept(&RangeFilter::new("balance", Some(50.0), None)), vec![1, 2, 3]);
    }

    #[test]
    fn test_max_only() {
        assert_eq!(kept(&RangeFilter::new("balance", None, Some(75.5))), vec![0, 1, 2]);
    }

    #[test]
    fn test_both_bounds_inclusive() {
        assert_eq!(kept(&RangeFilter::new("balance", Some(50.0), Some(100.0))), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_field_excluded() {
        let filter = RangeFilter::new("balance", Some(0.0), None);
        assert!(!filter.matches(&Record::new()));
    }
}
