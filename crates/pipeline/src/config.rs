//! Declarative query configuration and filter state.
//!
//! A `FilterConfig` describes which filters a screen offers; a `FilterState`
//! holds what the user currently picked for each of them. Both are plain
//! serde types so hosts can ship them as JSON.

use anyhow::{Context, Result};
use records::as_number;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Fields searched when a config does not name its own.
pub const DEFAULT_SEARCH_FIELDS: [&str; 3] = ["name", "title", "username"];

/// Value that marks a select filter as "no constraint".
pub const ALL_SENTINEL: &str = "all";

// =============================================================================
// Configuration
// =============================================================================

/// How a filter's current value is matched against a record.
///
/// Unknown type strings deserialize as `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Select,
    Multiselect,
    Range,
    DateRange,
    Boolean,
    #[default]
    #[serde(other)]
    Text,
}

/// One choice offered by a select or multiselect filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: Value,
    #[serde(default)]
    pub label: String,
}

/// A filter offered by a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub key: String,
    #[serde(rename = "type", default)]
    pub kind: FilterType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<FilterOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Also search this field with the free-text search term
    #[serde(default)]
    pub searchable: bool,
}

impl FilterDefinition {
    pub fn new(key: impl Into<String>, kind: FilterType, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            label: label.into(),
            options: Vec::new(),
            placeholder: None,
            searchable: false,
        }
    }

    /// Label shown in summaries, falling back to the key.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }
}

/// A field offered in the sort drop-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortField {
    pub key: String,
    #[serde(default)]
    pub label: String,
}

/// Everything a screen declares about searching, filtering and sorting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default, deserialize_with = "lenient_filters")]
    pub filters: Vec<FilterDefinition>,
    #[serde(default, alias = "searchFields", skip_serializing_if = "Option::is_none")]
    pub search_fields: Option<Vec<String>>,
    #[serde(default, alias = "sortFields")]
    pub sort_fields: Vec<SortField>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter definition (builder pattern).
    pub fn with_filter(mut self, definition: FilterDefinition) -> Self {
        self.filters.push(definition);
        self
    }

    /// Replace the searched fields (builder pattern).
    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse filter config")
    }

    /// Load a config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("In {}", path.display()))
    }

    /// First definition registered for `key`.
    pub fn definition(&self, key: &str) -> Option<&FilterDefinition> {
        self.filters.iter().find(|def| def.key == key)
    }

    /// Fields the free-text search looks at.
    ///
    /// The configured list (or `name`, `title`, `username`), followed by
    /// the key of every definition flagged `searchable`.
    pub fn effective_search_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = match &self.search_fields {
            Some(fields) => fields.clone(),
            None => DEFAULT_SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
        };
        for def in self.filters.iter().filter(|def| def.searchable) {
            if !fields.contains(&def.key) {
                fields.push(def.key.clone());
            }
        }
        fields
    }
}

/// Keep the filter entries that parse; skip the rest.
fn lenient_filters<'de, D>(deserializer: D) -> std::result::Result<Vec<FilterDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let filters = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match FilterDefinition::deserialize(&entry) {
            Ok(def) if !def.key.is_empty() => Some(def),
            Ok(_) => {
                tracing::warn!("Skipping filter definition {} with empty key", index);
                None
            }
            Err(err) => {
                tracing::warn!("Skipping malformed filter definition {}: {}", index, err);
                None
            }
        })
        .collect();
    Ok(filters)
}

// =============================================================================
// Current Values
// =============================================================================

/// Bounds of a numeric range filter.
///
/// Bounds accept numbers or numeric strings; empty or non-numeric input
/// leaves the bound unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeValue {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Bounds of a date range filter, as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRangeValue {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// The current value of one filter.
///
/// Which variant is meaningful depends on the definition's type: ranges
/// for `range`, date ranges for `date_range`, sets for `multiselect` and
/// scalars for the rest.
// Many comes first: serde would otherwise accept a two-element array as a
// positional RangeValue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Many(Vec<Value>),
    Range(RangeValue),
    DateRange(DateRangeValue),
    Scalar(Value),
}

impl FilterValue {
    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        FilterValue::Range(RangeValue { min, max })
    }

    pub fn date_range(start: Option<&str>, end: Option<&str>) -> Self {
        FilterValue::DateRange(DateRangeValue {
            start: start.filter(|s| !s.is_empty()).map(str::to_string),
            end: end.filter(|s| !s.is_empty()).map(str::to_string),
        })
    }

    pub fn many<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        FilterValue::Many(values.into_iter().map(Into::into).collect())
    }

    pub fn scalar(value: impl Into<Value>) -> Self {
        FilterValue::Scalar(value.into())
    }

    /// Whether this value imposes no constraint regardless of filter type.
    ///
    /// `null`, `""`, `"all"`, `false`, an empty set and a range without
    /// bounds are all inert.
    pub fn is_inert(&self) -> bool {
        match self {
            FilterValue::Scalar(Value::Null) | FilterValue::Scalar(Value::Bool(false)) => true,
            FilterValue::Scalar(Value::String(s)) => s.is_empty() || s == ALL_SENTINEL,
            FilterValue::Scalar(_) => false,
            FilterValue::Many(values) => values.is_empty(),
            FilterValue::Range(r) => r.min.is_none() && r.max.is_none(),
            FilterValue::DateRange(r) => r.start.is_none() && r.end.is_none(),
        }
    }

    /// The value as plain JSON, for descriptors and exports.
    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Scalar(v) => v.clone(),
            FilterValue::Many(values) => Value::Array(values.clone()),
            FilterValue::Range(r) => {
                let mut map = serde_json::Map::new();
                if let Some(min) = r.min {
                    map.insert("min".to_string(), Value::from(min));
                }
                if let Some(max) = r.max {
                    map.insert("max".to_string(), Value::from(max));
                }
                Value::Object(map)
            }
            FilterValue::DateRange(r) => {
                let mut map = serde_json::Map::new();
                if let Some(start) = &r.start {
                    map.insert("start".to_string(), Value::from(start.as_str()));
                }
                if let Some(end) = &r.end {
                    map.insert("end".to_string(), Value::from(end.as_str()));
                }
                Value::Object(map)
            }
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(as_number))
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(records::to_text)
        .filter(|s| !s.is_empty()))
}

/// Current value per filter key.
///
/// A missing key is the same as an inert value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<String, FilterValue>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter's value (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        self.values.insert(key.into(), value);
    }

    /// Drop one filter's value, making it inert.
    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.values.iter()
    }
}

impl From<BTreeMap<String, FilterValue>> for FilterState {
    fn from(values: BTreeMap<String, FilterValue>) -> Self {
        Self { values }
    }
}

/// Later entries win over earlier ones with the same key.
impl FromIterator<(String, FilterValue)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (String, FilterValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
