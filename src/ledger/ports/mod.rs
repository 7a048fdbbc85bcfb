//! Port contracts for ledger persistence.

pub mod repository;

pub use repository::{
    TransactionRepository, TransactionRepositoryError, TransactionRepositoryResult,
};
