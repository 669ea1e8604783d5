use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Amount, OWNER_NAME, coerce_amount};

/// Expense identifiers are assigned by the ledger from a monotonically
/// increasing counter and never reused.
pub type ExpenseId = u64;

/// A single shared expense between the owner and one friend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// Free text, may be empty
    pub description: String,
    pub amount: Amount,
    /// Friend who paid; always the owner for expenses created by the ledger
    pub paid_by: String,
    /// Friend this expense is shared with
    pub split_with: String,
    /// When the expense row was created
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create an empty expense paid by the owner. The id must be assigned by the ledger.
    pub fn new(id: ExpenseId, split_with: impl Into<String>) -> Self {
        Self {
            id,
            description: String::new(),
            amount: 0.0,
            paid_by: OWNER_NAME.to_string(),
            split_with: split_with.into(),
            created_at: Utc::now(),
        }
    }

    /// Returns true if `friend` is either the payer or the split partner.
    pub fn involves(&self, friend: &str) -> bool {
        self.paid_by == friend || self.split_with == friend
    }

    /// Replace one field with the given value.
    pub fn apply(&mut self, update: ExpenseUpdate) {
        match update {
            ExpenseUpdate::Description(description) => self.description = description,
            ExpenseUpdate::Amount(amount) => self.amount = amount,
            ExpenseUpdate::PaidBy(name) => self.paid_by = name,
            ExpenseUpdate::SplitWith(name) => self.split_with = name,
        }
    }
}

/// The mutable fields of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseField {
    Description,
    Amount,
    PaidBy,
    SplitWith,
}

impl ExpenseField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseField::Description => "description",
            ExpenseField::Amount => "amount",
            ExpenseField::PaidBy => "paidBy",
            ExpenseField::SplitWith => "splitWith",
        }
    }
}

impl std::fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExpenseField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "description" => Ok(ExpenseField::Description),
            "amount" => Ok(ExpenseField::Amount),
            "paidBy" | "paid_by" | "paid-by" => Ok(ExpenseField::PaidBy),
            "splitWith" | "split_with" | "split-with" => Ok(ExpenseField::SplitWith),
            other => Err(ParseFieldError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError(pub String);

impl std::fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown expense field '{}' (expected description, amount, paidBy or splitWith)",
            self.0
        )
    }
}

impl std::error::Error for ParseFieldError {}

/// A new value for one field of an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpenseUpdate {
    Description(String),
    Amount(Amount),
    PaidBy(String),
    SplitWith(String),
}

impl ExpenseUpdate {
    /// Build an update from raw text. Amount text is coerced, never rejected.
    pub fn parse(field: ExpenseField, raw: &str) -> Self {
        match field {
            ExpenseField::Description => ExpenseUpdate::Description(raw.to_string()),
            ExpenseField::Amount => ExpenseUpdate::Amount(coerce_amount(raw)),
            ExpenseField::PaidBy => ExpenseUpdate::PaidBy(raw.to_string()),
            ExpenseField::SplitWith => ExpenseUpdate::SplitWith(raw.to_string()),
        }
    }

    pub fn field(&self) -> ExpenseField {
        match self {
            ExpenseUpdate::Description(_) => ExpenseField::Description,
            ExpenseUpdate::Amount(_) => ExpenseField::Amount,
            ExpenseUpdate::PaidBy(_) => ExpenseField::PaidBy,
            ExpenseUpdate::SplitWith(_) => ExpenseField::SplitWith,
        }
    }
}
