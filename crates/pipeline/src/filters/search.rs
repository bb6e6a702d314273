//! Free-text search across several fields.

use crate::traits::Filter;
use records::{Record, field, to_text};

/// Keeps records where any searched field contains the term.
///
/// Matching is a case-insensitive substring test on each field's text form.
pub struct SearchFilter {
    fields: Vec<String>,
    needle: String,
}

impl SearchFilter {
    /// Create a new SearchFilter.
    ///
    /// # Arguments
    /// * `fields` - Field names to look in
    /// * `term` - The search term as typed
    pub fn new(fields: Vec<String>, term: &str) -> Self {
        Self {
            fields,
            needle: term.to_lowercase(),
        }
    }
}

impl Filter for SearchFilter {
    fn name(&self) -> &str {
        "SearchFilter"
    }

    fn matches(&self, record: &Record) -> bool {
        self.fields.iter().any(|key| {
            field(record, key)
                .and_then(to_text)
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}
