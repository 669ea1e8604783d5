use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::{AppError, build_reports};
use crate::domain::{Amount, Expense, Friend, Ledger, format_amount};

/// Point-in-time copy of the in-memory state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub friends: Vec<Friend>,
    pub expenses: Vec<Expense>,
    /// Sorted by friend name
    pub direct_payments: BTreeMap<String, Amount>,
}

impl LedgerSnapshot {
    pub fn capture(ledger: &Ledger) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            friends: ledger.friends().to_vec(),
            expenses: ledger.expenses().to_vec(),
            direct_payments: ledger
                .direct_payments()
                .iter()
                .map(|(name, amount)| (name.clone(), *amount))
                .collect(),
        }
    }
}

/// Exporter for writing ledger data to CSV or JSON
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export one row per split partner with totals and balance
    pub fn export_reports_csv<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "friend",
            "total_expenses",
            "you_paid",
            "they_paid",
            "expected_share",
            "balance",
        ])?;

        let mut count = 0;
        for report in build_reports(self.ledger) {
            csv_writer.write_record([
                report.friend,
                format_amount(report.summary.total_expenses),
                format_amount(report.summary.you_paid),
                format_amount(report.summary.they_paid),
                format_amount(report.expected_share),
                format_amount(report.balance),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        info!(rows = count, "exported friend reports");
        Ok(count)
    }

    /// Export every expense in creation order
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "description",
            "amount",
            "paid_by",
            "split_with",
            "created_at",
        ])?;

        let mut count = 0;
        for expense in self.ledger.expenses() {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.description.clone(),
                format_amount(expense.amount),
                expense.paid_by.clone(),
                expense.split_with.clone(),
                expense.created_at.to_rfc3339(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        info!(rows = count, "exported expenses");
        Ok(count)
    }

    /// Export the whole state as a pretty-printed JSON snapshot
    pub fn export_snapshot_json<W: Write>(
        &self,
        mut writer: W,
    ) -> Result<LedgerSnapshot, AppError> {
        let snapshot = LedgerSnapshot::capture(self.ledger);

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        info!(
            friends = snapshot.friends.len(),
            expenses = snapshot.expenses.len(),
            "exported snapshot"
        );
        Ok(snapshot)
    }
}
