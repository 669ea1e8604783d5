use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Expense, ExpenseSummary, Friend, Ledger, Standing};

/// Everything the presentation layer shows for one split partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendReport {
    pub friend: String,
    pub image: Option<String>,
    pub summary: ExpenseSummary,
    pub expected_share: Amount,
    pub balance: Amount,
    pub standing: Standing,
    /// Owner's direct payment as a share of the total
    pub your_percentage: f64,
    /// Friend's remainder as a share of the total
    pub their_percentage: f64,
    pub expenses: Vec<Expense>,
}

impl FriendReport {
    pub fn build(ledger: &Ledger, friend: &Friend) -> Self {
        let summary = ledger.summary(&friend.name);
        let balance = summary.balance();
        Self {
            friend: friend.name.clone(),
            image: friend.image.clone(),
            summary,
            expected_share: summary.expected_share(),
            balance,
            standing: Standing::from_balance(balance),
            your_percentage: summary.your_percentage(),
            their_percentage: summary.their_percentage(),
            expenses: ledger.expenses_for(&friend.name).cloned().collect(),
        }
    }
}

/// Reports for every split partner, in friend order.
pub fn build_reports(ledger: &Ledger) -> Vec<FriendReport> {
    ledger
        .split_partners()
        .map(|friend| FriendReport::build(ledger, friend))
        .collect()
}
