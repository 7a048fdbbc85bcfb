//! Application services for the reward ledger.

mod ledger;

pub use ledger::{LedgerService, LedgerServiceError, LedgerServiceResult};
