//! Filter for multi-choice checkboxes.

use crate::traits::Filter;
use records::{Record, field, same_value};
use serde_json::Value;

/// Keeps records whose field equals any of the checked values.
pub struct MultiSelectFilter {
    key: String,
    values: Vec<Value>,
}

impl MultiSelectFilter {
    pub fn new(key: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }
}

impl Filter for MultiSelectFilter {
    fn name(&self) -> &str {
        "MultiSelectFilter"
    }

    fn matches(&self, record: &Record) -> bool {
        match field(record, &self.key) {
            Some(v) => self.values.iter().any(|selected| same_value(v, selected)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_multiselect_union() {
        let filter = MultiSelectFilter::new("platform", vec![json!("gg"), json!("ps")]);

        let rows: Vec<Record> = ["gg", "ps", "luxon"]
            .iter()
            .map(|p| serde_json::from_value(json!({"platform": p})).unwrap())
            .collect();

        let kept: Vec<bool> = rows.iter().map(|r| filter.matches(r)).collect();
        assert_eq!(kept, vec![true, true, false]);
    }
}
