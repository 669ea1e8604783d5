// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use splitbills::application::{Applied, Event, Session};
use splitbills::domain::{Amount, ExpenseId, ExpenseUpdate, Ledger};

/// Ledger with the given friends added in order
pub fn ledger_with_friends(names: &[&str]) -> Ledger {
    let mut ledger = Ledger::new();
    for name in names {
        assert!(ledger.add_friend(name, None), "failed to add {}", name);
    }
    ledger
}

/// Add an expense shared with `friend` and set its amount
pub fn add_expense(ledger: &mut Ledger, friend: &str, amount: Amount) -> ExpenseId {
    let id = ledger.add_expense(friend).id;
    ledger.update_expense(id, ExpenseUpdate::Amount(amount));
    id
}

/// Test fixture: events a user would send through the UI
pub struct Events;

impl Events {
    pub fn add_friend(session: &mut Session, name: &str) -> Applied {
        session.apply(Event::AddFriend {
            name: name.to_string(),
            image: None,
        })
    }

    /// Add an expense with a description and amount, returning its ID
    pub fn add_expense(
        session: &mut Session,
        friend: &str,
        description: &str,
        amount: Amount,
    ) -> ExpenseId {
        let Applied::ExpenseAdded(id) = session.apply(Event::AddExpense {
            friend: friend.to_string(),
        }) else {
            panic!("expense was not added");
        };
        session.apply(Event::UpdateExpense {
            id,
            update: ExpenseUpdate::Description(description.to_string()),
        });
        session.apply(Event::UpdateExpense {
            id,
            update: ExpenseUpdate::Amount(amount),
        });
        id
    }

    pub fn pay(session: &mut Session, friend: &str, amount: Amount) -> Applied {
        session.apply(Event::SetDirectPayment {
            friend: friend.to_string(),
            amount,
        })
    }
}
