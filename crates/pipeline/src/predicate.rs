//! Turning a filter definition plus its current value into a predicate.
//!
//! This is the single place that decides whether a value is active for a
//! given filter type. A value that is inert, or whose shape does not fit
//! the type (a set handed to a range filter, say), produces no filter at
//! all and constrains nothing.

use crate::config::{FilterDefinition, FilterType, FilterValue};
use crate::filters::*;
use crate::traits::Filter;
use records::{Record, to_text};
use serde_json::Value;

/// Build the filter for one definition and value.
///
/// # Returns
/// * `Some(filter)` - The value is active for this definition
/// * `None` - The value is inert or does not fit the definition's type
pub fn build_filter(definition: &FilterDefinition, value: &FilterValue) -> Option<Box<dyn Filter>> {
    if value.is_inert() {
        return None;
    }
    let key = definition.key.as_str();

    match (definition.kind, value) {
        (FilterType::Select, FilterValue::Scalar(v)) => {
            Some(Box::new(SelectFilter::new(key, v.clone())))
        }
        (FilterType::Multiselect, FilterValue::Many(values)) => {
            Some(Box::new(MultiSelectFilter::new(key, values.clone())))
        }
        (FilterType::Range, FilterValue::Range(range)) => {
            Some(Box::new(RangeFilter::new(key, range.min, range.max)))
        }
        (FilterType::DateRange, FilterValue::DateRange(range)) => {
            DateRangeFilter::from_input(key, range.start.as_deref(), range.end.as_deref())
                .map(|f| Box::new(f) as Box<dyn Filter>)
        }
        (FilterType::Boolean, FilterValue::Scalar(v)) => {
            expected_flag(v)
                .map(|expected| Box::new(BooleanFilter::new(key, expected)) as Box<dyn Filter>)
        }
        (FilterType::Text, FilterValue::Scalar(v)) => to_text(v)
            .filter(|text| !text.is_empty())
            .map(|text| Box::new(TextFilter::new(key, &text)) as Box<dyn Filter>),
        (kind, _) => {
            tracing::warn!("Ignoring {:?} value of unexpected shape for '{}'", kind, key);
            None
        }
    }
}

/// Checkbox value: `true` (or the string `"true"`) constrains, anything
/// else is ignored. An unchecked box is inert, not "must be false".
fn expected_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(true) => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        _ => None,
    }
}

/// Whether this value currently constrains results for this definition.
pub fn is_active(definition: &FilterDefinition, value: &FilterValue) -> bool {
    build_filter(definition, value).is_some()
}

/// Evaluate one filter against one record.
///
/// Inert values match every record.
pub fn matches(record: &Record, definition: &FilterDefinition, value: &FilterValue) -> bool {
    build_filter(definition, value).is_none_or(|filter| filter.matches(record))
}
