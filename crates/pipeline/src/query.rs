//! The query engine: search, filter, sort and summarize in one call.
//!
//! `query` is a pure function of its inputs. It borrows the dataset and
//! returns a view into it; nothing is cached between calls, so the host
//! simply calls it again whenever the dataset, the filter state, the
//! search term or the sort changes.

use crate::config::{FilterConfig, FilterState};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::SearchFilter;
use crate::predicate::build_filter;
use crate::sort::{SortSpec, sort_records};
use crate::summary::{ActiveFilter, active_filters};
use records::Record;
use serde::Serialize;
use std::collections::HashSet;

/// Result of one query: the surviving records and the active-filter chips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutput<'a> {
    pub result: Vec<&'a Record>,
    pub active_filters: Vec<ActiveFilter>,
}

/// A query result detached from the dataset it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedQueryOutput {
    pub result: Vec<Record>,
    pub active_filters: Vec<ActiveFilter>,
}

impl QueryOutput<'_> {
    /// Clone the selected records, e.g. to hand them to an export job.
    pub fn into_owned(self) -> OwnedQueryOutput {
        OwnedQueryOutput {
            result: self.result.into_iter().cloned().collect(),
            active_filters: self.active_filters,
        }
    }
}

/// Build the pipeline for one query.
///
/// Search first, then one stage per active filter in config order. A key
/// declared twice is only applied once, using its first definition.
pub fn build_pipeline(
    config: &FilterConfig,
    state: &FilterState,
    search_term: &str,
) -> FilterPipeline {
    let mut pipeline = FilterPipeline::new();
    if !search_term.is_empty() {
        let fields = config.effective_search_fields();
        pipeline = pipeline.add_filter(SearchFilter::new(fields, search_term));
    }

    let mut seen = HashSet::new();
    for definition in &config.filters {
        if !seen.insert(definition.key.as_str()) {
            continue;
        }
        let filter = state
            .get(&definition.key)
            .and_then(|value| build_filter(definition, value));
        if let Some(filter) = filter {
            pipeline = pipeline.add_boxed(filter);
        }
    }
    pipeline
}

/// Run a query over a dataset.
///
/// ## Algorithm
/// 1. Keep records matching the search term in any searched field
/// 2. Keep records satisfying every active filter
/// 3. Stable-sort by `sort.field` when set
/// 4. Describe the search term and every active filter
///
/// # Arguments
/// * `dataset` - Records to query; never modified
/// * `config` - Declared filters and search fields
/// * `state` - Current value per filter key; missing keys are inert
/// * `search_term` - Free-text search, inert when empty
/// * `sort` - Ordering; no field keeps input order
pub fn query<'a>(
    dataset: &'a [Record],
    config: &FilterConfig,
    state: &FilterState,
    search_term: &str,
    sort: &SortSpec,
) -> QueryOutput<'a> {
    let pipeline = build_pipeline(config, state, search_term);
    let mut result = pipeline.apply(dataset.iter().collect());
    sort_records(&mut result, sort);

    tracing::debug!(
        "Query kept {} of {} records ({} stages)",
        result.len(),
        dataset.len(),
        pipeline.len()
    );

    QueryOutput {
        result,
        active_filters: active_filters(config, state, search_term),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterDefinition, FilterType, FilterValue};
    use serde_json::json;

    fn dataset() -> Vec<Record> {
        [
            json!({"name": "Ana", "role": "admin", "balance": 120}),
            json!({"name": "Bia", "role": "player", "balance": 80}),
            json!({"name": "Caio", "username": "cadmin", "role": "player", "balance": 40}),
        ]
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
    }

    #[test]
    fn test_inert_query_is_identity() {
        let data = dataset();
        let output = query(&data, &FilterConfig::new(), &FilterState::new(), "", &SortSpec::none());

        assert_eq!(output.result, data.iter().collect::<Vec<_>>());
        assert!(output.active_filters.is_empty());
    }

    #[test]
    fn test_search_filter_and_sort() {
        let data = dataset();
        let config = FilterConfig::new()
            .with_filter(FilterDefinition::new("role", FilterType::Select, "Role"));
        let state = FilterState::new().with("role", FilterValue::scalar("player"));

        let output = query(&data, &config, &state, "", &SortSpec::asc("balance"));
        let names: Vec<&str> = output.result.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Caio", "Bia"]);

        let output = query(&data, &config, &FilterState::new(), "ADMIN", &SortSpec::none());
        assert_eq!(output.result.len(), 1);
        assert_eq!(output.result[0]["name"], "Caio");
    }

    #[test]
    fn test_duplicate_definitions_use_first() {
        let data = dataset();
        let config = FilterConfig::new()
            .with_filter(FilterDefinition::new("role", FilterType::Select, "Role"))
            .with_filter(FilterDefinition::new("role", FilterType::Text, "Role text"));
        let state = FilterState::new().with("role", FilterValue::scalar("play"));

        let output = query(&data, &config, &state, "", &SortSpec::none());
        assert!(output.result.is_empty());
        assert_eq!(output.active_filters.len(), 1);
        assert_eq!(output.active_filters[0].label, "Role: play");
    }

    #[test]
    fn test_into_owned() {
        let data = dataset();
        let state = FilterState::new();
        let config = FilterConfig::new();
        let owned = query(&data, &config, &state, "bia", &SortSpec::none()).into_owned();
        drop(data);

        assert_eq!(owned.result.len(), 1);
        assert_eq!(owned.result[0]["balance"], 80);
        assert_eq!(owned.active_filters[0].key, "search");
    }
}
