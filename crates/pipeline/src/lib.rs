//! Query engine for dashboard datasets.
//!
//! This crate provides:
//! - Comparator for type-aware ordering of field values
//! - Filter trait and one implementation per filter type
//! - FilterPipeline for composing search and filter stages
//! - `query`, which searches, filters, sorts and summarizes in one pass
//!
//! ## Architecture
//! A query processes a dataset in stages:
//! 1. Free-text search across the configured fields
//! 2. One filter per active definition, combined with AND
//! 3. Stable sort on the requested field
//! 4. Active-filter descriptors for display
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{query, FilterConfig, FilterState, FilterValue, SortSpec};
//!
//! let config = FilterConfig::from_path(Path::new("filters.json"))?;
//! let state = FilterState::new().with("balance", FilterValue::range(Some(50.0), None));
//!
//! let output = query(&records, &config, &state, "admin", &SortSpec::desc("balance"));
//! for chip in &output.active_filters {
//!     println!("{}", chip.label);
//! }
//! ```

pub mod compare;
pub mod config;
pub mod filter_pipeline;
pub mod filters;
pub mod predicate;
pub mod query;
pub mod sort;
pub mod summary;
pub mod traits;

// Re-export main types
pub use compare::{SortKey, compare};
pub use config::{
    FilterConfig, FilterDefinition, FilterOption, FilterState, FilterType, FilterValue, SortField,
};
pub use filter_pipeline::FilterPipeline;
pub use predicate::{build_filter, is_active, matches};
pub use query::{OwnedQueryOutput, QueryOutput, query};
pub use sort::{SortOrder, SortSpec, sort_records};
pub use summary::{ActiveFilter, active_filters};
pub use traits::Filter;
