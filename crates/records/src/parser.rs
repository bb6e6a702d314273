//! Reading datasets out of JSON.
//!
//! Every entry point here enforces the same precondition: the top-level
//! value must be an array. Anything else is reported with the name of the
//! input instead of being quietly treated as an empty dataset.

use crate::error::{RecordError, Result, kind_of};
use crate::types::{PlatformAccount, Record};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a JSON document from disk.
pub fn read_json(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => RecordError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => RecordError::IoError(err),
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn expect_array<'a>(value: &'a Value, input: &str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| RecordError::NotAnArray {
        input: input.to_string(),
        found: kind_of(value),
    })
}

/// Validate and convert a raw dataset into records.
///
/// # Arguments
/// * `value` - The value received from upstream
/// * `input` - Name used in the error message (e.g. `"dataset"`)
///
/// # Returns
/// * `Err(NotAnArray)` - If `value` is not an array
/// * `Err(InvalidRecord)` - If an element is not an object
pub fn parse_dataset(value: &Value, input: &str) -> Result<Vec<Record>> {
    expect_array(value, input)?
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map.clone()),
            other => Err(RecordError::InvalidRecord {
                input: input.to_string(),
                index,
                found: kind_of(other),
            }),
        })
        .collect()
}

/// Validate and convert a raw account set.
pub fn parse_accounts(value: &Value) -> Result<Vec<PlatformAccount>> {
    const INPUT: &str = "accounts";
    expect_array(value, INPUT)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(RecordError::InvalidRecord {
                    input: INPUT.to_string(),
                    index,
                    found: kind_of(item),
                });
            }
            PlatformAccount::deserialize(item).map_err(|err| RecordError::InvalidShape {
                input: INPUT.to_string(),
                index,
                reason: err.to_string(),
            })
        })
        .collect()
}

/// Load a JSON array of records from a file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let value = read_json(path)?;
    let records = parse_dataset(&value, &path.display().to_string())?;
    tracing::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Load a JSON array of platform accounts from a file.
pub fn load_accounts(path: &Path) -> Result<Vec<PlatformAccount>> {
    let value = read_json(path)?;
    let accounts = parse_accounts(&value)?;
    tracing::debug!("Loaded {} accounts from {}", accounts.len(), path.display());
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_dataset() {
        let records = parse_dataset(&json!([{"name": "a"}, {"name": "b"}]), "dataset").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["name"], "b");
    }

    #[test]
    fn test_non_array_fails_fast() {
        let err = parse_dataset(&json!({"error": "unauthorized"}), "dataset").unwrap_err();
        match err {
            RecordError::NotAnArray { input, found } => {
                assert_eq!(input, "dataset");
                assert_eq!(found, "object");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_object_element() {
        let err = parse_dataset(&json!([{"name": "a"}, 3]), "players").unwrap_err();
        assert!(matches!(err, RecordError::InvalidRecord { index: 1, .. }));
        assert!(err.to_string().contains("players[1]"));
    }

    #[test]
    fn test_parse_accounts() {
        let accounts = parse_accounts(&json!([
            {"platform_name": "gg", "current_balance": 100.0, "pnl": 50.0, "includes_in_pnl": true},
            {"platform_name": "luxon", "current_balance": 20.0}
        ]))
        .unwrap();
        assert_eq!(accounts.len(), 2);
        assert!(!accounts[1].includes_in_pnl);
        assert_eq!(accounts[1].pnl, 0.0);

        assert!(matches!(
            parse_accounts(&json!(null)),
            Err(RecordError::NotAnArray { .. })
        ));
        assert!(matches!(
            parse_accounts(&json!([{"current_balance": 1.0}])),
            Err(RecordError::InvalidShape { index: 0, .. })
        ));
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"username": "admin"}}]"#).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["username"], "admin");
    }

    #[test]
    fn test_missing_file() {
        let err = load_records(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, RecordError::FileNotFound { .. }));
    }
}
