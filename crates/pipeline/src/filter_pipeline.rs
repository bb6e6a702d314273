//! Ordered composition of search and filter stages.

use crate::traits::Filter;
use records::Record;

/// Stages combine with logical AND: a record survives only if every stage
/// keeps it.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(SearchFilter::new(fields, "admin"))
///     .add_filter(RangeFilter::new("balance", Some(50.0), None));
///
/// let kept = pipeline.apply(dataset.iter().collect());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a stage (builder pattern).
    pub fn add_filter(self, filter: impl Filter + 'static) -> Self {
        self.add_boxed(Box::new(filter))
    }

    /// Add an already boxed filter (builder pattern).
    pub fn add_boxed(mut self, filter: Box<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every stage in insertion order.
    ///
    /// Each stage sees only what the previous ones kept, and relative order
    /// is preserved throughout.
    pub fn apply<'a>(&self, records: Vec<&'a Record>) -> Vec<&'a Record> {
        self.filters.iter().fold(records, |kept, stage| {
            let before = kept.len();
            let kept = stage.apply(kept);
            tracing::debug!("Stage {}: {} -> {} records", stage.name(), before, kept.len());
            kept
        })
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
