mod expense;
mod friend;
mod ledger;
mod money;

pub use expense::*;
pub use friend::*;
pub use ledger::*;
pub use money::*;
