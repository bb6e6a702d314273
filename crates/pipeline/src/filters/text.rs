//! Fallback filter: substring match on one field.

use crate::traits::Filter;
use records::{Record, field, to_text};

/// Keeps records whose field contains the typed text, ignoring case.
pub struct TextFilter {
    key: String,
    needle: String,
}

impl TextFilter {
    pub fn new(key: impl Into<String>, text: &str) -> Self {
        Self {
            key: key.into(),
            needle: text.to_lowercase(),
        }
    }
}

impl Filter for TextFilter {
    fn name(&self) -> &str {
        "TextFilter"
    }

    fn matches(&self, record: &Record) -> bool {
        field(record, &self.key)
            .and_then(to_text)
            .is_some_and(|text| text.to_lowercase().contains(&self.needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_contains() {
        let filter = TextFilter::new("email", "Team.IO");
        let hit: Record = serde_json::from_value(json!({"email": "ana@team.io"})).unwrap();
        let miss: Record = serde_json::from_value(json!({"email": "ana@other.io"})).unwrap();

        assert!(filter.matches(&hit));
        assert!(!filter.matches(&miss));
        assert!(!filter.matches(&Record::new()));
    }
}
