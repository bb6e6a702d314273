//! Operational status of a player's spreadsheet.
//!
//! Classification walks an ordered rule table and stops at the first rule
//! that applies, so `Critical` always wins over `Pending`, and `Complete` is
//! what remains when no rule applies.

use chrono::{DateTime, TimeDelta, Utc};
use records::PlayerRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data older than this many days makes a player `Pending`.
pub const STALE_AFTER_DAYS: i64 = 7;

/// Message for a player with nothing outstanding.
pub const COMPLETE_MESSAGE: &str = "Spreadsheet up to date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Critical,
    Pending,
    Complete,
}

impl PlayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerStatus::Critical => "critical",
            PlayerStatus::Pending => "pending",
            PlayerStatus::Complete => "complete",
        }
    }

    /// Badge text
    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerStatus::Critical => "Critical",
            PlayerStatus::Pending => "Pending",
            PlayerStatus::Complete => "Complete",
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the rule table.
struct StatusRule {
    status: PlayerStatus,
    heading: &'static str,
    applies: fn(&PlayerRecord, DateTime<Utc>) -> bool,
    reasons: fn(&PlayerRecord, DateTime<Utc>) -> Vec<String>,
}

static RULES: [StatusRule; 2] = [
    StatusRule {
        status: PlayerStatus::Critical,
        heading: "Action required",
        applies: needs_action,
        reasons: action_reasons,
    },
    StatusRule {
        status: PlayerStatus::Pending,
        heading: "Pending",
        applies: has_pending_work,
        reasons: pending_reasons,
    },
];

fn needs_action(player: &PlayerRecord, _now: DateTime<Utc>) -> bool {
    player.pending_reloads > 0 || player.pending_withdrawals > 0 || player.needs_attention
}

fn action_reasons(player: &PlayerRecord, _now: DateTime<Utc>) -> Vec<String> {
    let mut reasons = Vec::new();
    if player.pending_reloads > 0 {
        reasons.push(format!("{} reload(s) pending", player.pending_reloads));
    }
    if player.pending_withdrawals > 0 {
        reasons.push(format!("{} withdrawal(s) pending", player.pending_withdrawals));
    }
    if player.needs_attention {
        reasons.push("flagged for attention".to_string());
    }
    // Not a trigger on its own, but worth surfacing while action is needed
    if player.accounts_outdated > 0 {
        reasons.push(format!(
            "{} account(s) not updated in over 24h",
            player.accounts_outdated
        ));
    }
    reasons
}

fn has_pending_work(player: &PlayerRecord, now: DateTime<Utc>) -> bool {
    player.incomplete_data > 0 || player.status == "pending" || is_stale(player, now)
}

fn pending_reasons(player: &PlayerRecord, now: DateTime<Utc>) -> Vec<String> {
    let mut reasons = Vec::new();
    if player.incomplete_data > 0 {
        reasons.push(format!("{} incomplete field(s)", player.incomplete_data));
    }
    if player.status == "pending" {
        reasons.push("status marked pending".to_string());
    }
    if is_stale(player, now) {
        reasons.push(format!("data outdated (over {STALE_AFTER_DAYS} days)"));
    }
    reasons
}

/// Whether `last_update` lies strictly before `now - 7 days`.
///
/// A missing or unparsable timestamp is not stale.
pub fn is_stale(player: &PlayerRecord, now: DateTime<Utc>) -> bool {
    player
        .last_updated_at()
        .is_some_and(|updated| updated < now - TimeDelta::days(STALE_AFTER_DAYS))
}

/// Status of a player together with why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub status: PlayerStatus,
    pub reasons: Vec<String>,
    pub message: String,
}

/// Classify and explain in one pass, against an explicit clock.
///
/// A missing player is `Complete`.
pub fn assess_at(player: Option<&PlayerRecord>, now: DateTime<Utc>) -> Assessment {
    let matched = player.and_then(|p| {
        RULES
            .iter()
            .find(|rule| (rule.applies)(p, now))
            .map(|rule| (p, rule))
    });

    match matched {
        Some((player, rule)) => {
            let reasons = (rule.reasons)(player, now);
            let message = format!("{}: {}", rule.heading, reasons.join(", "));
            Assessment {
                status: rule.status,
                reasons,
                message,
            }
        }
        None => Assessment {
            status: PlayerStatus::Complete,
            reasons: Vec::new(),
            message: COMPLETE_MESSAGE.to_string(),
        },
    }
}

pub fn classify_at(player: Option<&PlayerRecord>, now: DateTime<Utc>) -> PlayerStatus {
    assess_at(player, now).status
}

pub fn explain_at(player: Option<&PlayerRecord>, now: DateTime<Utc>) -> String {
    assess_at(player, now).message
}

/// Classify a player as of the current time.
///
/// The clock is read on every call; nothing is cached.
pub fn classify(player: Option<&PlayerRecord>) -> PlayerStatus {
    classify_at(player, Utc::now())
}

/// Explanatory message for a player as of the current time.
pub fn explain(player: Option<&PlayerRecord>) -> String {
    explain_at(player, Utc::now())
}

/// Status counts across a roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusStats {
    pub total: usize,
    pub complete: usize,
    pub pending: usize,
    pub critical: usize,
}

impl StatusStats {
    pub fn record(&mut self, status: PlayerStatus) {
        self.total += 1;
        match status {
            PlayerStatus::Complete => self.complete += 1,
            PlayerStatus::Pending => self.pending += 1,
            PlayerStatus::Critical => self.critical += 1,
        }
    }
}

impl FromIterator<PlayerStatus> for StatusStats {
    fn from_iter<I: IntoIterator<Item = PlayerStatus>>(iter: I) -> Self {
        let mut stats = StatusStats::default();
        for status in iter {
            stats.record(status);
        }
        stats
    }
}

/// A player paired with its assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedPlayer<'a> {
    pub player: &'a PlayerRecord,
    #[serde(flatten)]
    pub assessment: Assessment,
}

/// Assess every player of a roster against one clock reading.
pub fn annotate_at(
    players: &[PlayerRecord],
    now: DateTime<Utc>,
) -> (Vec<AnnotatedPlayer<'_>>, StatusStats) {
    let annotated: Vec<AnnotatedPlayer<'_>> = players
        .iter()
        .map(|player| AnnotatedPlayer {
            player,
            assessment: assess_at(Some(player), now),
        })
        .collect();
    let stats: StatusStats = annotated.iter().map(|a| a.assessment.status).collect();

    tracing::debug!(
        "Classified {} players: {} critical, {} pending, {} complete",
        stats.total,
        stats.critical,
        stats.pending,
        stats.complete
    );
    (annotated, stats)
}

pub fn annotate(players: &[PlayerRecord]) -> (Vec<AnnotatedPlayer<'_>>, StatusStats) {
    annotate_at(players, Utc::now())
}
