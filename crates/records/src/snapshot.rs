//! Loading a dashboard data directory into an immutable snapshot.
//!
//! The engines are pure functions over resident data. A `Snapshot` owns that
//! data, so every evaluation started from it sees one consistent copy even
//! if the files on disk change underneath.

use crate::error::{RecordError, Result};
use crate::parser;
use crate::types::{PlatformAccount, PlayerRecord, Record};
use std::path::Path;

/// Player rows and platform accounts read from one data directory.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub players: Vec<Record>,
    pub accounts: Vec<PlatformAccount>,
}

impl Snapshot {
    /// Creates a new, empty Snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `players.json` and `accounts.json` from a directory.
    ///
    /// Both files are parsed in parallel with `rayon::join`. A missing
    /// `accounts.json` yields an empty account set; `players.json` is
    /// required.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        tracing::info!("Loading dashboard data from {}", data_dir.display());

        let players_path = data_dir.join("players.json");
        let accounts_path = data_dir.join("accounts.json");

        let (players, accounts) = rayon::join(
            || parser::load_records(&players_path),
            || match parser::load_accounts(&accounts_path) {
                Err(RecordError::FileNotFound { path }) => {
                    tracing::warn!("No account file at {}, continuing without accounts", path);
                    Ok(Vec::new())
                }
                other => other,
            },
        );

        let snapshot = Self {
            players: players?,
            accounts: accounts?,
        };
        let (players, accounts) = snapshot.counts();
        tracing::info!("Loaded {} players and {} accounts", players, accounts);
        Ok(snapshot)
    }

    /// Typed player views, one per record.
    ///
    /// Malformed fields read as zero values (see [`PlayerRecord`]), so one
    /// bad row never hides the rest of the roster.
    pub fn player_records(&self) -> Vec<PlayerRecord> {
        self.players.iter().map(PlayerRecord::from_record).collect()
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.players.len(), self.accounts.len())
    }
}
