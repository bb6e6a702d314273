//! Type-aware value comparison for sorting.
//!
//! Raw field values are first classified into a [`SortKey`] (number, date,
//! or text) and only then compared, so coercion never happens implicitly.
//!
//! Ordering policy:
//! - numbers compare numerically, numeric strings included
//! - on date fields (name contains `date` or ends with `_at`) values compare
//!   chronologically; unparsable dates sort before every valid date
//! - everything else compares as case-sensitive text
//! - absent (or `null`) values sort after every present value

use chrono::{DateTime, Utc};
use records::{as_number, parse_date, to_text};
use serde_json::Value;
use std::cmp::Ordering;

/// A field value after explicit classification.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    /// `None` marks a value that could not be parsed as a date
    Date(Option<DateTime<Utc>>),
    Text(String),
}

/// The category a comparison is carried out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Number,
    Date,
    Text,
}

/// Whether a field name marks its values as dates.
pub fn is_date_field(field_hint: &str) -> bool {
    field_hint.contains("date") || field_hint.ends_with("_at")
}

impl SortKey {
    /// Classify a value into the given category.
    ///
    /// Returns `None` only for `KeyKind::Number` when the value is not
    /// numeric; dates degrade to `Date(None)` and text always succeeds.
    pub fn classify(value: &Value, kind: KeyKind) -> Option<Self> {
        match kind {
            KeyKind::Number => as_number(value).map(SortKey::Number),
            KeyKind::Date => Some(SortKey::Date(parse_date(value))),
            KeyKind::Text => Some(SortKey::Text(to_text(value).unwrap_or_default())),
        }
    }

    /// Compare two keys of the same category.
    ///
    /// Keys of different categories are ordered Number < Date < Text.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            // Option orders None first: invalid dates before valid ones
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Date(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

/// Pick the comparison category for a pair of present values.
fn pair_kind(a: &Value, b: &Value, field_hint: &str) -> KeyKind {
    if as_number(a).is_some() && as_number(b).is_some() {
        KeyKind::Number
    } else if is_date_field(field_hint) {
        KeyKind::Date
    } else {
        KeyKind::Text
    }
}

/// Compare two field values.
///
/// # Arguments
/// * `a`, `b` - The values, `None` when the field is absent
/// * `field_hint` - The field name, used to detect date fields
///
/// # Returns
/// The ascending order of `a` relative to `b`
pub fn compare(a: Option<&Value>, b: Option<&Value>, field_hint: &str) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let kind = pair_kind(a, b, field_hint);
            match (SortKey::classify(a, kind), SortKey::classify(b, kind)) {
                (Some(a), Some(b)) => a.compare(&b),
                _ => Ordering::Equal,
            }
        }
    }
}

/// Classify every value of a column for sorting.
///
/// Pairwise classification can flip between numeric and text comparison
/// inside one column (`"9" < "10"` numerically but `"10" < "1z"` as text),
/// which is not transitive. Each value therefore gets its own category:
/// numeric when it reads as a number, a date on date fields, text
/// otherwise. Categories order Number < Date < Text, so numeric pairs still
/// compare numerically and the order stays total. For pairs of the same
/// category this agrees with [`compare`].
pub fn column_keys(values: &[Option<&Value>], field_hint: &str) -> Vec<Option<SortKey>> {
    let fallback = if is_date_field(field_hint) {
        KeyKind::Date
    } else {
        KeyKind::Text
    };

    values
        .iter()
        .map(|value| {
            value.filter(|v| !v.is_null()).and_then(|v| {
                let kind = if as_number(v).is_some() {
                    KeyKind::Number
                } else {
                    fallback
                };
                SortKey::classify(v, kind)
            })
        })
        .collect()
}

/// Compare two column keys, absent keys last.
pub fn compare_keys(a: &Option<SortKey>, b: &Option<SortKey>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.compare(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cmp(a: Value, b: Value, hint: &str) -> Ordering {
        compare(Some(&a), Some(&b), hint)
    }

    #[test]
    fn test_numeric_strings_compare_numerically() {
        assert_eq!(cmp(json!("9"), json!("10"), "amount"), Ordering::Less);
        assert_eq!(cmp(json!(10), json!("10"), "amount"), Ordering::Equal);
        assert_eq!(cmp(json!(2.5), json!(-1), "amount"), Ordering::Greater);
    }

    #[test]
    fn test_text_is_case_sensitive() {
        assert_eq!(cmp(json!("Bob"), json!("alice"), "name"), Ordering::Less);
        assert_eq!(cmp(json!("bob"), json!("bob"), "name"), Ordering::Equal);
    }

    #[test]
    fn test_dates_on_date_fields() {
        assert_eq!(
            cmp(json!("2024-02-01"), json!("2024-01-15T12:00:00Z"), "created_at"),
            Ordering::Greater
        );
        assert_eq!(
            cmp(json!("2023-12-31"), json!("2024-01-01"), "due_date"),
            Ordering::Less
        );
        // Without a date hint these are plain strings
        assert_eq!(
            cmp(json!("10/01/2024"), json!("9/01/2024"), "label"),
            Ordering::Less
        );
    }

    #[test]
    fn test_invalid_dates_sort_first() {
        assert_eq!(cmp(json!("garbage"), json!("2024-01-01"), "updated_at"), Ordering::Less);
        assert_eq!(cmp(json!("2024-01-01"), json!("garbage"), "updated_at"), Ordering::Greater);
        assert_eq!(cmp(json!("garbage"), json!("nope"), "updated_at"), Ordering::Equal);
    }

    #[test]
    fn test_absent_sorts_last() {
        let v = json!(1);
        assert_eq!(compare(None, Some(&v), "x"), Ordering::Greater);
        assert_eq!(compare(Some(&v), None, "x"), Ordering::Less);
        assert_eq!(compare(Some(&Value::Null), None, "x"), Ordering::Equal);
    }

    #[test]
    fn test_mixed_column_keeps_numbers_numeric() {
        let values = [json!("10"), json!(9), json!("1z"), json!("n/a")];
        let refs: Vec<Option<&Value>> = values.iter().map(Some).collect();
        let keys = column_keys(&refs, "code");

        assert_eq!(keys[0], Some(SortKey::Number(10.0)));
        assert!(matches!(keys[2], Some(SortKey::Text(_))));
        // 9 < 10 < "1z" < "n/a", consistently
        assert_eq!(compare_keys(&keys[1], &keys[0]), Ordering::Less);
        assert_eq!(compare_keys(&keys[0], &keys[2]), Ordering::Less);
        assert_eq!(compare_keys(&keys[1], &keys[2]), Ordering::Less);
        assert_eq!(compare_keys(&keys[2], &keys[3]), Ordering::Less);
    }

    #[test]
    fn test_date_column_ranks_numbers_first() {
        let values = [json!("2024-01-01"), json!(5), json!("garbage")];
        let refs: Vec<Option<&Value>> = values.iter().map(Some).collect();
        let keys = column_keys(&refs, "created_at");

        assert_eq!(keys[1], Some(SortKey::Number(5.0)));
        assert_eq!(keys[2], Some(SortKey::Date(None)));
        assert_eq!(compare_keys(&keys[1], &keys[2]), Ordering::Less);
        assert_eq!(compare_keys(&keys[2], &keys[0]), Ordering::Less);
    }

    #[test]
    fn test_numeric_column_with_absent() {
        let values = [json!(3), Value::Null, json!("1")];
        let refs = vec![Some(&values[0]), None, Some(&values[1]), Some(&values[2])];
        let keys = column_keys(&refs, "balance");

        assert_eq!(keys[0], Some(SortKey::Number(3.0)));
        assert_eq!(keys[1], None);
        assert_eq!(keys[2], None);
        assert_eq!(keys[3], Some(SortKey::Number(1.0)));
    }
}
