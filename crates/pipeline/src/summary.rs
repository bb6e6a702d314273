//! Human-readable summary of the constraints currently in effect.
//!
//! Descriptors are display-only: they are derived from the same config and
//! state as the query and never feed back into filtering.

use crate::config::{FilterConfig, FilterDefinition, FilterState, FilterType, FilterValue};
use crate::predicate::is_active;
use records::to_text;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Key of the descriptor that represents the free-text search.
pub const SEARCH_KEY: &str = "search";

/// One active constraint, as shown in a chip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveFilter {
    pub key: String,
    pub label: String,
    pub value: Value,
}

/// Descriptor for a non-empty search term.
pub fn search_descriptor(term: &str) -> ActiveFilter {
    ActiveFilter {
        key: SEARCH_KEY.to_string(),
        label: format!("Search: \"{term}\""),
        value: Value::from(term),
    }
}

/// Render a filter value for its chip.
///
/// ## Format
/// - range: `min - max`, an unset min shown as `0` and an unset max as `∞`
/// - date range: `start - end`, unset bounds left blank
/// - sets: values joined with `, `
/// - scalars: the value itself
pub fn format_value(definition: &FilterDefinition, value: &FilterValue) -> String {
    match (definition.kind, value) {
        (FilterType::Range, FilterValue::Range(range)) => {
            let min = range.min.map_or_else(|| "0".to_string(), |m| m.to_string());
            let max = range.max.map_or_else(|| "∞".to_string(), |m| m.to_string());
            format!("{min} - {max}")
        }
        (FilterType::DateRange, FilterValue::DateRange(range)) => format!(
            "{} - {}",
            range.start.as_deref().unwrap_or(""),
            range.end.as_deref().unwrap_or("")
        ),
        (_, FilterValue::Many(values)) => values
            .iter()
            .filter_map(to_text)
            .collect::<Vec<_>>()
            .join(", "),
        (_, FilterValue::Scalar(v)) => to_text(v).unwrap_or_default(),
        (_, other) => other.to_json().to_string(),
    }
}

/// Descriptors for everything that currently constrains a query.
///
/// The search term comes first, then one descriptor per active filter in
/// the order the config declares them. State keys with no definition are
/// ignored, as are repeated definitions of the same key.
pub fn active_filters(
    config: &FilterConfig,
    state: &FilterState,
    search_term: &str,
) -> Vec<ActiveFilter> {
    let mut active = Vec::new();
    if !search_term.is_empty() {
        active.push(search_descriptor(search_term));
    }

    let mut seen = HashSet::new();
    for definition in &config.filters {
        if !seen.insert(definition.key.as_str()) {
            continue;
        }
        let Some(value) = state.get(&definition.key) else {
            continue;
        };
        if !is_active(definition, value) {
            continue;
        }
        active.push(ActiveFilter {
            key: definition.key.clone(),
            label: format!("{}: {}", definition.display_label(), format_value(definition, value)),
            value: value.to_json(),
        });
    }
    active
}
