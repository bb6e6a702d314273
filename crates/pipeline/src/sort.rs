//! Stable ordering of query results.

use crate::compare::{column_keys, compare_keys};
use records::{Record, field};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}', expected asc or desc")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Which field to order by, if any.
///
/// No field (or an empty one) leaves input order untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            order: SortOrder::Desc,
        }
    }

    /// The field to sort by, `None` when sorting is off.
    pub fn active_field(&self) -> Option<&str> {
        self.field.as_deref().filter(|f| !f.is_empty())
    }
}

/// Sort records in place.
///
/// The sort is stable in both directions: records with equal keys keep
/// their input order. `Desc` flips the key comparison only, so ties are
/// not reversed.
pub fn sort_records(records: &mut Vec<&Record>, spec: &SortSpec) {
    let Some(key) = spec.active_field() else {
        return;
    };

    let values: Vec<_> = records.iter().map(|record| field(record, key)).collect();
    let keys = column_keys(&values, key);

    let mut keyed: Vec<_> = keys.into_iter().zip(records.drain(..)).collect();
    keyed.sort_by(|(a, _), (b, _)| match spec.order {
        SortOrder::Asc => compare_keys(a, b),
        SortOrder::Desc => compare_keys(b, a),
    });
    records.extend(keyed.into_iter().map(|(_, record)| record));
}
