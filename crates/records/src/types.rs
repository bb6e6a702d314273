//! Core data types for dashboard datasets.
//!
//! Records arrive from the surrounding application as plain JSON objects
//! with no fixed schema. This module defines that record shape, the
//! explicit coercions the engines use to read a field, and the two typed
//! views (players and platform accounts) that have known fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// Untyped Records
// =============================================================================

/// One row of a dataset: field name to JSON value.
///
/// A `null` field and a missing field mean the same thing everywhere in the
/// workspace; use [`field`] rather than indexing the map directly.
pub type Record = serde_json::Map<String, Value>;

/// Look up a field, treating `null` as absent.
pub fn field<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

/// Read a value as a finite number.
///
/// JSON numbers and numeric strings (surrounding whitespace ignored) are
/// numbers. Everything else, including `""`, `"NaN"` and booleans, is not.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Render a value as display text, `None` for `null`.
///
/// Whole numbers print without a fractional part, so `50.0` and `50` both
/// read as `"50"`.
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(format_number(n)),
        other => Some(other.to_string()),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < 1e15) {
            return format!("{}", f as i64);
        }
    }
    n.to_string()
}

/// Truthiness of a value: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Loose equality used for select and multiselect matching.
///
/// Numbers compare by value (`1` equals `1.0`); everything else must be the
/// same JSON value. A string never equals a number.
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Parse a value as a point in time.
///
/// Accepted forms:
/// - RFC 3339 strings (`2024-03-01T10:00:00Z`, with any offset)
/// - naive date-times `YYYY-MM-DDTHH:MM[:SS[.fff]]` or with a space separator
/// - plain dates `YYYY-MM-DD` (midnight)
/// - JSON numbers, read as epoch milliseconds
///
/// Naive forms are read as UTC.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// =============================================================================
// Player Records
// =============================================================================

/// The subset of a player row that status classification reads.
///
/// Reading a row never fails. Missing, `null` and malformed fields take
/// their zero value:
/// - counts go through [`as_number`], so `2`, `2.0` and `"2"` all read as
///   two; fractions round up, and zero, negative or non-numeric input is
///   zero
/// - `needs_attention` is set only by a JSON `true`
/// - `name` and `status` go through [`to_text`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Record")]
pub struct PlayerRecord {
    pub name: String,
    pub pending_reloads: u32,
    pub pending_withdrawals: u32,
    pub needs_attention: bool,
    /// Number of spreadsheet fields the player still has to fill in
    pub incomplete_data: u32,
    pub status: String,
    /// Raw timestamp of the last spreadsheet update (see [`parse_date`])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<Value>,
    /// Accounts whose balance has not been refreshed in over 24 hours
    pub accounts_outdated: u32,
}

impl PlayerRecord {
    /// Read the typed view out of an untyped record.
    pub fn from_record(record: &Record) -> Self {
        let text = |key: &str| field(record, key).and_then(to_text).unwrap_or_default();
        let count = |key: &str| field(record, key).map_or(0, as_count);

        Self {
            name: text("name"),
            pending_reloads: count("pending_reloads"),
            pending_withdrawals: count("pending_withdrawals"),
            needs_attention: matches!(field(record, "needs_attention"), Some(Value::Bool(true))),
            incomplete_data: count("incomplete_data"),
            status: text("status"),
            last_update: field(record, "last_update").cloned(),
            accounts_outdated: count("accounts_outdated"),
        }
    }

    /// Parsed `last_update`, `None` when absent or unparsable.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_update.as_ref().and_then(parse_date)
    }
}

impl From<Record> for PlayerRecord {
    fn from(record: Record) -> Self {
        Self::from_record(&record)
    }
}

/// A count field: positive numbers round up so they never read as zero.
fn as_count(value: &Value) -> u32 {
    match as_number(value) {
        Some(n) if n > 0.0 => n.ceil().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

// =============================================================================
// Platform Accounts
// =============================================================================

/// A player's balance on one platform.
///
/// `includes_in_pnl` only governs P&L accounting; the balance always counts
/// toward the visible total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAccount {
    pub platform_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_balance: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pnl: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub includes_in_pnl: bool,
}

impl PlatformAccount {
    pub fn new(
        platform_name: impl Into<String>,
        current_balance: f64,
        pnl: f64,
        includes_in_pnl: bool,
    ) -> Self {
        Self {
            platform_name: platform_name.into(),
            current_balance,
            pnl,
            includes_in_pnl,
        }
    }

    /// Build an account from its initial and current balances.
    ///
    /// P&L is `current - initial` for an existing account that takes part in
    /// P&L accounting. Transfer wallets (`includes_in_pnl == false`) and
    /// platforms the player has no account on carry zero P&L.
    pub fn from_balances(
        platform_name: impl Into<String>,
        initial_balance: f64,
        current_balance: f64,
        has_account: bool,
        includes_in_pnl: bool,
    ) -> Self {
        let pnl = if includes_in_pnl && has_account {
            current_balance - initial_balance
        } else {
            0.0
        };
        Self::new(platform_name, current_balance, pnl, includes_in_pnl)
    }
}

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
