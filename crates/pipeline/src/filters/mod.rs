//! Filter implementations for the query pipeline.
//!
//! One filter per filter type, plus the free-text search stage. All of
//! them can be composed into a FilterPipeline.

pub mod boolean;
pub mod date_range;
pub mod multiselect;
pub mod range;
pub mod search;
pub mod select;
pub mod text;

// Re-export for convenience
pub use boolean::BooleanFilter;
pub use date_range::DateRangeFilter;
pub use multiselect::MultiSelectFilter;
pub use range::RangeFilter;
pub use search::SearchFilter;
pub use select::SelectFilter;
pub use text::TextFilter;
