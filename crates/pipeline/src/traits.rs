//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that every search and filter stage
//! implements, so stages compose into a FilterPipeline.

use records::Record;

/// One constraint applied to a dataset.
///
/// ## Design Note
/// - `Send + Sync` allows a built pipeline to be shared across threads
/// - Stages work on borrowed records and never mutate them; the result of a
///   query is a view into the caller's dataset
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether a single record satisfies this filter.
    fn matches(&self, record: &Record) -> bool;

    /// Apply this filter to a set of records, preserving their order.
    ///
    /// # Arguments
    /// * `records` - The records to filter (takes ownership of the view)
    ///
    /// # Returns
    /// The records for which [`Filter::matches`] holds
    fn apply<'a>(&self, records: Vec<&'a Record>) -> Vec<&'a Record> {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}
