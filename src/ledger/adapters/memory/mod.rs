//! In-memory ledger adapters.

mod transaction;

pub use transaction::InMemoryTransactionRepository;
