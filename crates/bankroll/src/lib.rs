//! Business rules of the bankroll dashboard.
//!
//! - [`status`]: classify a player as critical, pending or complete, with
//!   a human-readable explanation
//! - [`aggregate`]: balance and P&L totals across platform accounts
//! - [`currency`]: dollar formatting for those totals

pub mod aggregate;
pub mod currency;
pub mod status;

pub use aggregate::{AccountTotals, aggregate, aggregate_value, by_platform};
pub use currency::format_usd;
pub use status::{
    AnnotatedPlayer, Assessment, COMPLETE_MESSAGE, PlayerStatus, STALE_AFTER_DAYS, StatusStats,
    annotate, annotate_at, assess_at, classify, classify_at, explain, explain_at, is_stale,
};
