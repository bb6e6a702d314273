//! # Records Crate
//!
//! Data model shared by the query, status and aggregation engines.
//!
//! ## Main Components
//!
//! - **types**: `Record`, field coercions, `PlayerRecord`, `PlatformAccount`
//! - **parser**: JSON datasets with the "must be an array" precondition
//! - **snapshot**: Load a data directory into an immutable `Snapshot`
//! - **error**: Error types for reading datasets
//!
//! ## Example Usage
//!
//! ```ignore
//! use records::{Snapshot, parse_dataset};
//! use std::path::Path;
//!
//! let snapshot = Snapshot::load_from_dir(Path::new("data"))?;
//! let players = snapshot.player_records();
//!
//! // Values fetched elsewhere go through the same precondition check
//! let rows = parse_dataset(&fetched_json, "dataset")?;
//! ```

pub mod error;
pub mod parser;
pub mod snapshot;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{RecordError, Result};
pub use parser::{load_accounts, load_records, parse_accounts, parse_dataset, read_json};
pub use snapshot::Snapshot;
pub use types::{
    PlatformAccount, PlayerRecord, Record, as_number, field, is_truthy, parse_date, same_value,
    to_text,
};
