//! Exact-match filter for single-choice drop-downs.

use crate::traits::Filter;
use records::{Record, field, same_value};
use serde_json::Value;

/// Keeps records whose field equals the selected value.
pub struct SelectFilter {
    key: String,
    value: Value,
}

impl SelectFilter {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl Filter for SelectFilter {
    fn name(&self) -> &str {
        "SelectFilter"
    }

    fn matches(&self, record: &Record) -> bool {
        field(record, &self.key).is_some_and(|v| same_value(v, &self.value))
    }
}
