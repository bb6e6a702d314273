//! Checkbox filter on a field's truthiness.

use crate::traits::Filter;
use records::{Record, is_truthy};
use serde_json::Value;

/// Keeps records whose field's truthiness equals `expected`.
///
/// A missing field counts as falsy.
pub struct BooleanFilter {
    key: String,
    expected: bool,
}

impl BooleanFilter {
    pub fn new(key: impl Into<String>, expected: bool) -> Self {
        Self {
            key: key.into(),
            expected,
        }
    }
}

impl Filter for BooleanFilter {
    fn name(&self) -> &str {
        "BooleanFilter"
    }

    fn matches(&self, record: &Record) -> bool {
        is_truthy(record.get(&self.key).unwrap_or(&Value::Null)) == self.expected
    }
}
