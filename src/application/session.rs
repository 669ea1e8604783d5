use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Settings;
use crate::domain::{Amount, ExpenseId, ExpenseUpdate, Ledger};
use crate::i18n::Language;

use super::{AppError, FriendReport, build_reports};

/// An input event forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    AddFriend {
        name: String,
        image: Option<String>,
    },
    /// Friends are addressed by their position in the friend list
    RemoveFriend {
        index: usize,
    },
    AddExpense {
        friend: String,
    },
    UpdateExpense {
        id: ExpenseId,
        update: ExpenseUpdate,
    },
    RemoveExpense {
        id: ExpenseId,
    },
    SetDirectPayment {
        friend: String,
        amount: Amount,
    },
    ToggleLanguage,
}

/// What applying an event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applied {
    Changed,
    ExpenseAdded(ExpenseId),
    /// The stored (clamped) payment
    PaymentSet(Amount),
    /// Rejected input; state is untouched
    Ignored,
}

impl Applied {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Applied::Ignored)
    }
}

fn changed(applied: bool) -> Applied {
    if applied {
        Applied::Changed
    } else {
        Applied::Ignored
    }
}

/// Owns the ledger plus the display state around it.
/// This is the primary interface for any front end.
pub struct Session {
    ledger: Ledger,
    language: Language,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            ledger: Ledger::new().with_default_image(settings.default_image.clone()),
            language: settings.language,
            settings,
        }
    }

    /// Apply one event. Invalid input yields [`Applied::Ignored`], never an error.
    pub fn apply(&mut self, event: Event) -> Applied {
        debug!(?event, "applying event");

        let applied = match event {
            Event::AddFriend { name, image } => {
                changed(self.ledger.add_friend(&name, image.as_deref()))
            }
            Event::RemoveFriend { index } => {
                changed(self.ledger.remove_friend_at(index).is_some())
            }
            Event::AddExpense { friend } => {
                Applied::ExpenseAdded(self.ledger.add_expense(&friend).id)
            }
            Event::UpdateExpense { id, update } => changed(self.ledger.update_expense(id, update)),
            Event::RemoveExpense { id } => changed(self.ledger.remove_expense(id).is_some()),
            Event::SetDirectPayment { friend, amount } => {
                Applied::PaymentSet(self.ledger.set_direct_payment(&friend, amount))
            }
            Event::ToggleLanguage => {
                self.language = self.language.toggle();
                Applied::Changed
            }
        };

        debug!(?applied, "event applied");
        applied
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Report for one split partner. `None` for the owner or an unknown name.
    pub fn report(&self, friend: &str) -> Option<FriendReport> {
        self.ledger
            .split_partners()
            .find(|f| f.name == friend)
            .map(|f| FriendReport::build(&self.ledger, f))
    }

    pub fn require_report(&self, friend: &str) -> Result<FriendReport, AppError> {
        self.report(friend)
            .ok_or_else(|| AppError::FriendNotFound(friend.to_string()))
    }

    /// Reports for every split partner, in friend order.
    pub fn reports(&self) -> Vec<FriendReport> {
        build_reports(&self.ledger)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
