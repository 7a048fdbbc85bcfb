//! Domain model for reward conversion and ledger entries.

mod entry;
mod error;
mod rate;

pub use entry::{
    Credit, LedgerEntry, PersistedLedgerEntryData, TransactionId, TransactionKind,
    TransactionStatus,
};
pub use error::{LedgerDomainError, ParseTransactionKindError, ParseTransactionStatusError};
pub use rate::{ConversionRate, parse_minor_units};
