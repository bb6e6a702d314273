//! Balance and P&L totals over a player's platform accounts.

use crate::currency::format_usd;
use records::{PlatformAccount, parse_accounts};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Headline figures for a set of accounts.
///
/// The two totals are independent sums over different subsets: every
/// account counts toward `total_balance`, only accounts that take part in
/// P&L accounting count toward `total_pnl`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AccountTotals {
    pub total_balance: f64,
    pub total_pnl: f64,
}

impl AccountTotals {
    fn add(&mut self, account: &PlatformAccount) {
        self.total_balance += account.current_balance;
        if account.includes_in_pnl {
            self.total_pnl += account.pnl;
        }
    }

    pub fn formatted_balance(&self) -> String {
        format_usd(self.total_balance)
    }

    pub fn formatted_pnl(&self) -> String {
        format_usd(self.total_pnl)
    }
}

/// Sum balance and P&L over all accounts. Empty input gives zero totals.
pub fn aggregate(accounts: &[PlatformAccount]) -> AccountTotals {
    let mut totals = AccountTotals::default();
    for account in accounts {
        totals.add(account);
    }
    totals
}

/// Parse raw JSON accounts and aggregate them.
///
/// Fails when the input is not an array of account objects.
pub fn aggregate_value(value: &Value) -> records::Result<AccountTotals> {
    let accounts = parse_accounts(value)?;
    Ok(aggregate(&accounts))
}

/// Totals per platform name, in name order.
pub fn by_platform(accounts: &[PlatformAccount]) -> BTreeMap<&str, AccountTotals> {
    let mut groups: BTreeMap<&str, AccountTotals> = BTreeMap::new();
    for account in accounts {
        groups
            .entry(account.platform_name.as_str())
            .or_default()
            .add(account);
    }
    groups
}
