use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Amount, DEFAULT_FRIEND_IMAGE, Expense, ExpenseId, ExpenseUpdate, Friend, OWNER_NAME};

/// In-memory state of the expense splitter: friends in insertion order
/// (owner first), expenses in creation order, and the direct payments the
/// owner has recorded per friend.
///
/// Every mutation is a single `&mut self` call, so observers never see a
/// partially applied change. Invalid input is ignored or normalized; the
/// return values tell the caller whether anything changed.
#[derive(Debug, Clone)]
pub struct Ledger {
    friends: Vec<Friend>,
    expenses: Vec<Expense>,
    direct_payments: HashMap<String, Amount>,
    next_expense_id: ExpenseId,
    default_image: String,
}

/// Totals for the expenses shared with one friend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total_expenses: Amount,
    /// Direct payment recorded by the owner
    pub you_paid: Amount,
    /// Remainder attributed to the friend; negative when a stored payment
    /// exceeds a total that shrank after it was set
    pub they_paid: Amount,
}

impl ExpenseSummary {
    /// Equal share each side is expected to carry.
    pub fn expected_share(&self) -> Amount {
        self.total_expenses / 2.0
    }

    pub fn your_percentage(&self) -> f64 {
        super::percentage(self.you_paid, self.total_expenses)
    }

    pub fn their_percentage(&self) -> f64 {
        super::percentage(self.they_paid, self.total_expenses)
    }

    /// Owner's paid share minus the expected share.
    pub fn balance(&self) -> Amount {
        self.you_paid - self.expected_share()
    }
}

/// Who owes whom, derived from a balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Standing {
    /// The friend owes the owner this much
    FriendOwesYou(Amount),
    /// The owner owes the friend this much
    YouOweFriend(Amount),
    Settled,
}

impl Standing {
    pub fn from_balance(balance: Amount) -> Self {
        if balance > 0.0 {
            Standing::FriendOwesYou(balance)
        } else if balance < 0.0 {
            Standing::YouOweFriend(-balance)
        } else {
            Standing::Settled
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Standing::Settled)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create a ledger containing only the owner.
    pub fn new() -> Self {
        Self {
            friends: vec![Friend::owner()],
            expenses: Vec::new(),
            direct_payments: HashMap::new(),
            next_expense_id: 1,
            default_image: DEFAULT_FRIEND_IMAGE.to_string(),
        }
    }

    /// Use `image` for friends added without one.
    pub fn with_default_image(mut self, image: impl Into<String>) -> Self {
        self.default_image = image.into();
        self
    }

    // ========================
    // Friends
    // ========================

    /// Add a friend. Ignored (returns false) when the trimmed name is empty
    /// or already taken. A blank image falls back to the default image.
    pub fn add_friend(&mut self, name: &str, image: Option<&str>) -> bool {
        let name = name.trim();
        if name.is_empty() || self.friend(name).is_some() {
            return false;
        }

        let image = image
            .map(str::trim)
            .filter(|image| !image.is_empty())
            .unwrap_or(self.default_image.as_str())
            .to_string();

        self.friends.push(Friend::new(name).with_image(image));
        true
    }

    /// Remove a friend together with every expense involving them and
    /// their direct payment. Ignored for the owner and for unknown names.
    pub fn remove_friend(&mut self, name: &str) -> bool {
        if name == OWNER_NAME {
            return false;
        }
        let Some(position) = self.friends.iter().position(|f| f.name == name) else {
            return false;
        };

        self.friends.remove(position);
        self.expenses.retain(|expense| !expense.involves(name));
        self.direct_payments.remove(name);
        true
    }

    /// Remove the friend at `index` in insertion order.
    /// Returns the removed friend, or `None` for the owner or a bad index.
    pub fn remove_friend_at(&mut self, index: usize) -> Option<Friend> {
        let friend = self.friends.get(index)?.clone();
        self.remove_friend(&friend.name).then_some(friend)
    }

    pub fn friend(&self, name: &str) -> Option<&Friend> {
        self.friends.iter().find(|f| f.name == name)
    }

    /// All friends, owner first.
    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    /// Friends expenses can be split with: everyone except the owner.
    pub fn split_partners(&self) -> impl Iterator<Item = &Friend> {
        self.friends.iter().filter(|f| !f.is_owner())
    }

    // ========================
    // Expenses
    // ========================

    /// Append an empty expense shared with `split_with`.
    /// The name is not checked against the friend list.
    pub fn add_expense(&mut self, split_with: &str) -> &Expense {
        let id = self.next_expense_id;
        self.next_expense_id += 1;
        self.expenses.push(Expense::new(id, split_with));
        &self.expenses[self.expenses.len() - 1]
    }

    /// Replace one field of the expense with `id`. Returns false if no such expense exists.
    pub fn update_expense(&mut self, id: ExpenseId, update: ExpenseUpdate) -> bool {
        match self.expenses.iter_mut().find(|e| e.id == id) {
            Some(expense) => {
                expense.apply(update);
                true
            }
            None => false,
        }
    }

    /// Remove the expense with `id`, returning it if it existed.
    pub fn remove_expense(&mut self, id: ExpenseId) -> Option<Expense> {
        let position = self.expenses.iter().position(|e| e.id == id)?;
        Some(self.expenses.remove(position))
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// All expenses in creation order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Expenses shared with `friend`, in creation order.
    pub fn expenses_for<'a>(&'a self, friend: &'a str) -> impl Iterator<Item = &'a Expense> {
        self.expenses.iter().filter(move |e| e.split_with == friend)
    }

    // ========================
    // Direct payments & balances
    // ========================

    /// Record how much of the shared total the owner has paid.
    /// The value is clamped to `[0, total]` as of now (non-finite input
    /// counts as 0) and returned.
    pub fn set_direct_payment(&mut self, friend: &str, amount: Amount) -> Amount {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let total = self.total_expenses(friend);
        let stored = amount.max(0.0).min(total);
        self.direct_payments.insert(friend.to_string(), stored);
        stored
    }

    /// Stored direct payment, if one was ever set. It is not re-clamped
    /// when the total later shrinks.
    pub fn direct_payment(&self, friend: &str) -> Option<Amount> {
        self.direct_payments.get(friend).copied()
    }

    pub fn direct_payments(&self) -> &HashMap<String, Amount> {
        &self.direct_payments
    }

    /// Sum of the amounts of all expenses shared with `friend`.
    pub fn total_expenses(&self, friend: &str) -> Amount {
        self.expenses_for(friend).map(|e| e.amount).sum()
    }

    pub fn summary(&self, friend: &str) -> ExpenseSummary {
        let total_expenses = self.total_expenses(friend);
        let you_paid = self.direct_payment(friend).unwrap_or(0.0);
        ExpenseSummary {
            total_expenses,
            you_paid,
            they_paid: total_expenses - you_paid,
        }
    }

    /// Positive: the friend owes the owner. Negative: the owner owes the friend.
    pub fn balance(&self, friend: &str) -> Amount {
        self.summary(friend).balance()
    }

    pub fn standing(&self, friend: &str) -> Standing {
        Standing::from_balance(self.balance(friend))
    }
}
