// Application layer - the event boundary between the presentation layer
// and the ledger. Events go in, reports come out.

pub mod error;
pub mod reporting;
pub mod session;

pub use error::*;
pub use reporting::*;
pub use session::*;
